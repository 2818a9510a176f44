use super::PresentationSink;
use crate::upload::messages;
use crate::upload::{Rejection, SubmissionOutcome, TargetMode};
use log::debug;
use std::io::Write;
use std::sync::Mutex;

/// Renders the upload page on a terminal.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Sink calls are fire-and-forget, write errors included.
        let _ = writeln!(out, "{}", text).and_then(|_| out.flush());
    }
}

pub fn render_progress(percent: u8, label: &str) -> String {
    format!("[{:>3}%] {}", percent, label)
}

pub fn render_outcome(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Success {
            mode,
            message,
            profile_link,
        } => {
            let mut text = format!("✅ {}\n{}", messages::RESULT_TITLE_SUCCESS, message);
            if *mode == TargetMode::Draft {
                text.push_str("\n\n");
                text.push_str(messages::DRAFT_NOTICE);
            }
            if let Some(link) = profile_link {
                text.push_str(&format!("\n\n{}: {}", messages::OPEN_PROFILE, link));
            }
            text
        }
        SubmissionOutcome::Failure { message, .. } => {
            format!("❌ {}\n{}", messages::RESULT_TITLE_FAILURE, message)
        }
    }
}

pub fn render_rejection(rejection: &Rejection) -> String {
    format!("⚠ {}", rejection)
}

impl PresentationSink for ConsoleSink {
    fn on_progress(&self, percent: u8, label: &str) {
        self.write(&render_progress(percent, label));
    }

    fn on_outcome(&self, outcome: &SubmissionOutcome) {
        self.write(&render_outcome(outcome));
    }

    fn on_controls_reset(&self) {
        debug!("Upload controls ready");
    }

    fn on_controls_locked(&self, mode: TargetMode) {
        self.write(&format!("⏳ {}中...", mode.label()));
    }

    fn on_rejected(&self, rejection: &Rejection) {
        self.write(&render_rejection(rejection));
    }
}
