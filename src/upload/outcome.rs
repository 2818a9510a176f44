use super::messages;
use super::request::TargetMode;
use std::fmt;

/// Failure taxonomy shared by pre-flight rejections and submission outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    FileTooLarge,
    UnsupportedType,
    PrivacyRestriction,
    Validation,
    Cooldown,
    Busy,
    Network,
    Http { status: u16 },
    Api { code: ApiErrorCode },
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile => f.write_str("MISSING_FILE"),
            Self::FileTooLarge => f.write_str("FILE_TOO_LARGE"),
            Self::UnsupportedType => f.write_str("UNSUPPORTED_TYPE"),
            Self::PrivacyRestriction => f.write_str("PRIVACY_RESTRICTION"),
            Self::Validation => f.write_str("VALIDATION_ERROR"),
            Self::Cooldown => f.write_str("COOLDOWN_ERROR"),
            Self::Busy => f.write_str("BUSY"),
            Self::Network => f.write_str("NETWORK_ERROR"),
            Self::Http { status } => write!(f, "HTTP_ERROR({})", status),
            Self::Api { code } => write!(f, "API_ERROR({})", code.as_str()),
            Self::Unknown => f.write_str("UNKNOWN_ERROR"),
        }
    }
}

/// Backend failures that have a known, actionable explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    ContentPostingPermission,
    PrivateAccountRequired,
    SpamRisk,
}

impl ApiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentPostingPermission => "content_posting_permission",
            Self::PrivateAccountRequired => "private_account_required",
            Self::SpamRisk => "spam_risk",
        }
    }
}

struct ApiErrorRule {
    pattern: &'static str,
    code: ApiErrorCode,
    message: &'static str,
}

// Evaluated top to bottom; the first pattern found in the server text wins.
const API_ERROR_RULES: &[ApiErrorRule] = &[
    ApiErrorRule {
        pattern: "Content Posting API",
        code: ApiErrorCode::ContentPostingPermission,
        message: messages::CONTENT_POSTING_API_ERROR,
    },
    ApiErrorRule {
        pattern: "未監査クライアント",
        code: ApiErrorCode::PrivateAccountRequired,
        message: messages::PRIVATE_ACCOUNT_REQUIRED,
    },
    ApiErrorRule {
        pattern: "unaudited_client_can_only_post_to_private_accounts",
        code: ApiErrorCode::PrivateAccountRequired,
        message: messages::PRIVATE_ACCOUNT_REQUIRED,
    },
    ApiErrorRule {
        pattern: "spam_risk_too_many_pending_share",
        code: ApiErrorCode::SpamRisk,
        message: messages::SPAM_RISK_ERROR,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        mode: TargetMode,
        message: String,
        profile_link: Option<String>,
    },
    Failure {
        kind: ErrorKind,
        message: String,
        raw_message: String,
    },
}

impl SubmissionOutcome {
    /// Build the outcome of a `{success: true}` response.
    pub fn success(mode: TargetMode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| messages::UPLOAD_COMPLETE.to_string());
        let profile_link = extract_profile_link(&message);
        Self::Success {
            mode,
            message,
            profile_link,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>, raw_message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
            raw_message: raw_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }
}

/// Map the `error` text of a `{success: false}` response to an outcome.
pub fn classify_api_error(error: Option<&str>) -> SubmissionOutcome {
    let raw = error.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return SubmissionOutcome::failure(ErrorKind::Unknown, messages::UPLOAD_FAILED, "");
    }

    match API_ERROR_RULES.iter().find(|rule| raw.contains(rule.pattern)) {
        Some(rule) => SubmissionOutcome::failure(ErrorKind::Api { code: rule.code }, rule.message, raw),
        None => SubmissionOutcome::failure(ErrorKind::Unknown, raw, raw),
    }
}

/// Find the profile URL in a success message (`プロフィール: https://...`).
pub fn extract_profile_link(message: &str) -> Option<String> {
    message
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(messages::PROFILE_MARKER))
        .map(str::trim)
        .find(|link| link.starts_with("https://") || link.starts_with("http://"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spam_risk_is_rewritten_to_actionable_message() {
        let outcome = classify_api_error(Some("spam_risk_too_many_pending_share: wait"));
        match outcome {
            SubmissionOutcome::Failure {
                kind,
                message,
                raw_message,
            } => {
                assert_eq!(kind, ErrorKind::Api { code: ApiErrorCode::SpamRisk });
                assert!(message.starts_with("投稿頻度が高すぎます。"));
                assert!(message.contains("【対処法】"));
                assert_eq!(raw_message, "spam_risk_too_many_pending_share: wait");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        // Mentions both the permission and the spam pattern.
        let outcome =
            classify_api_error(Some("Content Posting API denied; spam_risk_too_many_pending_share"));
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure {
                kind: ErrorKind::Api {
                    code: ApiErrorCode::ContentPostingPermission
                },
                ..
            }
        ));
    }

    #[test]
    fn private_account_error_matches_both_spellings() {
        for text in [
            "未監査クライアントはプライベートアカウントのみ",
            "403: unaudited_client_can_only_post_to_private_accounts",
        ] {
            let outcome = classify_api_error(Some(text));
            assert_eq!(outcome.message(), messages::PRIVATE_ACCOUNT_REQUIRED);
        }
    }

    #[test]
    fn unknown_error_passes_through_verbatim() {
        let outcome = classify_api_error(Some("quota exceeded for today"));
        assert_eq!(
            outcome,
            SubmissionOutcome::failure(
                ErrorKind::Unknown,
                "quota exceeded for today",
                "quota exceeded for today"
            )
        );
    }

    #[test]
    fn missing_error_text_uses_generic_message() {
        let outcome = classify_api_error(None);
        assert_eq!(outcome.message(), messages::UPLOAD_FAILED);
    }

    #[test]
    fn profile_link_is_extracted_from_marker_line() {
        let message = "動画アップロードが完了しました。\nプロフィール: https://www.tiktok.com/@someone";
        assert_eq!(
            extract_profile_link(message).as_deref(),
            Some("https://www.tiktok.com/@someone")
        );
        assert_eq!(extract_profile_link("完了しました。"), None);
        assert_eq!(extract_profile_link("プロフィール: not-a-link"), None);
    }

    #[test]
    fn success_without_message_uses_default_text() {
        let outcome = SubmissionOutcome::success(TargetMode::Draft, None);
        assert_eq!(outcome.message(), messages::UPLOAD_COMPLETE);
        assert!(outcome.is_success());
    }
}
