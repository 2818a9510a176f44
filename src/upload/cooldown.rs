use super::messages;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Time of the last confirmed upload in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownState {
    last_successful_submit_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownBlocked {
    pub remaining: Duration,
}

impl CooldownBlocked {
    /// Whole minutes left, rounded up. A sub-millisecond remainder counts.
    pub fn remaining_minutes(&self) -> i64 {
        let whole_ms = self.remaining.num_milliseconds();
        let ms = if self.remaining > Duration::milliseconds(whole_ms) {
            whole_ms.saturating_add(1)
        } else {
            whole_ms
        };
        ms.saturating_add(59_999).div_euclid(60_000)
    }
}

impl fmt::Display for CooldownBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&messages::cooldown(self.remaining_minutes()))
    }
}

impl CooldownState {
    pub fn last_successful_submit_at(&self) -> Option<DateTime<Utc>> {
        self.last_successful_submit_at
    }

    pub fn check(&self, now: DateTime<Utc>, window: Duration) -> Result<(), CooldownBlocked> {
        let Some(last) = self.last_successful_submit_at else {
            return Ok(());
        };
        let elapsed = now - last;
        if elapsed < window {
            return Err(CooldownBlocked {
                remaining: window.checked_sub(&elapsed).unwrap_or(window),
            });
        }
        Ok(())
    }

    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.last_successful_submit_at = Some(at);
    }
}
