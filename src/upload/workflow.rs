use super::cooldown::{CooldownBlocked, CooldownState};
use super::messages;
use super::outcome::{classify_api_error, ErrorKind, SubmissionOutcome};
use super::progress::Checkpoint;
use super::request::{TargetMode, UploadRequest};
use super::validation::{self, ValidationError};
use crate::config::UploadPolicy;
use crate::presentation::PresentationSink;
use crate::transport::{TransportClient, TransportError, UploadForm};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Wall-clock source for the cooldown gate.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Validating,
    Submitting,
}

/// Why an attempt stopped before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("{0}")]
    CoolingDown(CooldownBlocked),

    #[error("{}", messages::UPLOAD_IN_PROGRESS)]
    Busy,
}

impl Rejection {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(err) => err.kind(),
            Self::CoolingDown(_) => ErrorKind::Cooldown,
            Self::Busy => ErrorKind::Busy,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponseBody {
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    phase: WorkflowPhase,
    cooldown: CooldownState,
}

/// Runs one upload attempt at a time: validate, gate on the cooldown,
/// post to the backend and report to the presentation sink.
pub struct UploadWorkflow {
    policy: UploadPolicy,
    transport: Arc<dyn TransportClient>,
    sink: Arc<dyn PresentationSink>,
    clock: Arc<dyn Clock>,
    session: Mutex<SessionState>,
}

/// Returns the session to idle and re-enables the controls when an attempt
/// ends, whichever way it ends.
struct AttemptGuard<'a> {
    workflow: &'a UploadWorkflow,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.workflow.session().phase = WorkflowPhase::Idle;
        self.workflow.sink.on_controls_reset();
        debug!("[Upload] attempt finished, controls reset");
    }
}

impl UploadWorkflow {
    pub fn new(
        policy: UploadPolicy,
        transport: Arc<dyn TransportClient>,
        sink: Arc<dyn PresentationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy,
            transport,
            sink,
            clock,
            session: Mutex::new(SessionState {
                phase: WorkflowPhase::Idle,
                cooldown: CooldownState::default(),
            }),
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.session().phase
    }

    pub fn last_successful_submit_at(&self) -> Option<DateTime<Utc>> {
        self.session().cooldown.last_successful_submit_at()
    }

    pub fn validate(&self, request: &UploadRequest) -> Result<(), ValidationError> {
        validation::validate(request, &self.policy)
    }

    pub fn check_cooldown(&self, now: DateTime<Utc>) -> Result<(), CooldownBlocked> {
        self.session()
            .cooldown
            .check(now, self.policy.cooldown_window())
    }

    /// Submit one upload. Pre-flight problems come back as `Err` without
    /// touching the network; everything after that is a `SubmissionOutcome`.
    pub async fn submit(&self, request: &UploadRequest) -> Result<SubmissionOutcome, Rejection> {
        let mode = request.target_mode;
        let _attempt = match self.begin_attempt() {
            Ok(guard) => guard,
            Err(rejection) => {
                self.sink.on_rejected(&rejection);
                return Err(rejection);
            }
        };
        let now = self.clock.now();

        if let Err(rejection) = self.preflight(request, now) {
            warn!("[Upload] {} rejected ({}): {}", mode.label(), rejection.kind(), rejection);
            self.sink.on_rejected(&rejection);
            return Err(rejection);
        }

        let Some(form) = UploadForm::from_request(request) else {
            let rejection = Rejection::Invalid(ValidationError::MissingFile);
            self.sink.on_rejected(&rejection);
            return Err(rejection);
        };

        self.session().phase = WorkflowPhase::Submitting;
        self.sink.on_controls_locked(mode);
        info!("[Upload] {} submitting to {}", mode.label(), mode.endpoint());

        let outcome = self.execute(mode, form).await;
        match &outcome {
            SubmissionOutcome::Success { .. } => {
                self.session().cooldown.record_success(now);
                info!("[Upload] {} succeeded", mode.label());
            }
            SubmissionOutcome::Failure { kind, raw_message, .. } => {
                warn!("[Upload] {} failed ({}): {}", mode.label(), kind, raw_message);
            }
        }

        self.sink.on_outcome(&outcome);
        Ok(outcome)
    }

    fn begin_attempt(&self) -> Result<AttemptGuard<'_>, Rejection> {
        let mut session = self.session();
        if session.phase != WorkflowPhase::Idle {
            warn!("[Upload] attempt refused, previous attempt still {:?}", session.phase);
            return Err(Rejection::Busy);
        }
        session.phase = WorkflowPhase::Validating;
        Ok(AttemptGuard { workflow: self })
    }

    fn preflight(&self, request: &UploadRequest, now: DateTime<Utc>) -> Result<(), Rejection> {
        self.validate(request)?;
        self.check_cooldown(now).map_err(Rejection::CoolingDown)
    }

    async fn execute(&self, mode: TargetMode, form: UploadForm) -> SubmissionOutcome {
        self.progress(mode, Checkpoint::RequestSending);

        let response = match self.transport.post(mode.endpoint(), form).await {
            Ok(response) => response,
            Err(err) => return self.fail(mode, network_failure(&err)),
        };
        self.progress(mode, Checkpoint::ServerProcessing);

        if !response.is_success() {
            let detail = format!("HTTP {}", response.status);
            return self.fail(
                mode,
                SubmissionOutcome::failure(
                    ErrorKind::Http {
                        status: response.status,
                    },
                    messages::error_detail(&detail),
                    response.body.unwrap_or_else(|err| err),
                ),
            );
        }

        let text = match response.body {
            Ok(text) => text,
            Err(err) => return self.fail(mode, invalid_body(&err, err.clone())),
        };
        let body: UploadResponseBody = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(err) => return self.fail(mode, invalid_body(&err.to_string(), text)),
        };
        self.progress(mode, Checkpoint::ConfirmingResult);

        if body.success {
            self.progress(mode, Checkpoint::Completed);
            SubmissionOutcome::success(mode, body.message)
        } else {
            self.fail(mode, classify_api_error(body.error.as_deref()))
        }
    }

    fn fail(&self, mode: TargetMode, outcome: SubmissionOutcome) -> SubmissionOutcome {
        self.progress(mode, Checkpoint::Errored);
        outcome
    }

    fn progress(&self, mode: TargetMode, checkpoint: Checkpoint) {
        self.sink.on_progress(checkpoint.percent(), &checkpoint.label(mode));
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn invalid_body(reason: &str, raw: String) -> SubmissionOutcome {
    let detail = format!("Invalid response body: {}", reason);
    SubmissionOutcome::failure(ErrorKind::Network, messages::error_detail(&detail), raw)
}

fn network_failure(err: &TransportError) -> SubmissionOutcome {
    let raw = err.to_string();
    let message = match err {
        TransportError::Connect(_) => messages::SERVER_CONNECTION_ERROR.to_string(),
        _ if raw.is_empty() => messages::NETWORK_ERROR.to_string(),
        _ => messages::error_detail(&raw),
    };
    SubmissionOutcome::failure(ErrorKind::Network, message, raw)
}
