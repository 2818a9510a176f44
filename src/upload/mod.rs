pub mod cooldown;
pub mod messages;
pub mod outcome;
pub mod progress;
pub mod request;
pub mod validation;
pub mod workflow;

pub use cooldown::{CooldownBlocked, CooldownState};
pub use outcome::{ApiErrorCode, ErrorKind, SubmissionOutcome};
pub use request::{PrivacyLevel, TargetMode, UploadRequest, VideoFile};
pub use validation::ValidationError;
pub use workflow::{Clock, Rejection, SystemClock, UploadWorkflow, WorkflowPhase};
