pub mod browser;
pub mod console;
pub mod format;

use crate::upload::{Rejection, SubmissionOutcome, TargetMode};

pub use console::ConsoleSink;

/// Where the upload workflow reports what it is doing. Calls are
/// fire-and-forget; implementations must not block.
pub trait PresentationSink: Send + Sync {
    fn on_progress(&self, percent: u8, label: &str);

    fn on_outcome(&self, outcome: &SubmissionOutcome);

    /// Re-enable the submit controls. Fires once at the end of every attempt.
    fn on_controls_reset(&self);

    /// Disable the submit controls while a request is in flight.
    fn on_controls_locked(&self, _mode: TargetMode) {}

    fn on_rejected(&self, _rejection: &Rejection) {}
}
