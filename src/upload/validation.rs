use super::messages;
use super::outcome::ErrorKind;
use super::request::{PrivacyLevel, UploadRequest};
use crate::config::UploadPolicy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", messages::MISSING_FILE)]
    MissingFile,

    #[error("ファイルサイズが大きすぎます。{}MB以下にしてください。", .max_bytes / (1024 * 1024))]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("{} ({})", messages::UNSUPPORTED_FILE_TYPE, .mime_type)]
    UnsupportedType { mime_type: String },

    #[error("{}", messages::MISSING_PRIVACY)]
    MissingPrivacy,

    #[error("{}", messages::PRIVACY_RESTRICTION)]
    PrivacyRestricted { requested: PrivacyLevel },

    #[error("{}", messages::CONSENT_REQUIRED)]
    ConsentRequired,

    #[error("キャプションは{max}文字以内で入力してください。")]
    CaptionTooLong { length: usize, max: usize },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile => ErrorKind::MissingFile,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::PrivacyRestricted { .. } => ErrorKind::PrivacyRestriction,
            Self::MissingPrivacy | Self::ConsentRequired | Self::CaptionTooLong { .. } => {
                ErrorKind::Validation
            }
        }
    }
}

/// Check an upload request against the policy. Stops at the first problem.
pub fn validate(request: &UploadRequest, policy: &UploadPolicy) -> Result<(), ValidationError> {
    let file = match &request.file {
        Some(file) if file.size_bytes > 0 => file,
        _ => return Err(ValidationError::MissingFile),
    };

    if file.size_bytes > policy.max_file_size_bytes {
        return Err(ValidationError::FileTooLarge {
            size_bytes: file.size_bytes,
            max_bytes: policy.max_file_size_bytes,
        });
    }

    if !policy.supported_types.iter().any(|t| t == &file.mime_type) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type.clone(),
        });
    }

    match request.privacy_level {
        None => return Err(ValidationError::MissingPrivacy),
        Some(level) if policy.restricted_privacy && level != PrivacyLevel::SelfOnly => {
            return Err(ValidationError::PrivacyRestricted { requested: level });
        }
        Some(_) => {}
    }

    if !request.user_consent {
        return Err(ValidationError::ConsentRequired);
    }

    let length = request.caption.chars().count();
    if length > policy.max_caption_chars {
        return Err(ValidationError::CaptionTooLong {
            length,
            max: policy.max_caption_chars,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::request::{TargetMode, VideoFile, VideoSource};

    const MIB: u64 = 1024 * 1024;

    // Size is declared, not allocated.
    fn request_with(size: u64, mime: &str) -> UploadRequest {
        let file = VideoFile {
            name: "clip".into(),
            size_bytes: size,
            mime_type: mime.into(),
            source: VideoSource::Memory(Vec::new()),
        };
        UploadRequest::new(file, TargetMode::Publish).consent(true)
    }

    #[test]
    fn accepts_well_formed_request() {
        let request = request_with(4 * MIB, "video/mp4").caption("週末のダンス");
        assert_eq!(validate(&request, &UploadPolicy::default()), Ok(()));
    }

    #[test]
    fn missing_or_empty_file_is_rejected() {
        let policy = UploadPolicy::default();
        let mut request = request_with(0, "video/mp4");
        assert_eq!(validate(&request, &policy), Err(ValidationError::MissingFile));

        request.file = None;
        let err = validate(&request, &policy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingFile);
    }

    #[test]
    fn oversized_file_is_rejected_before_type_check() {
        let request = request_with(150 * MIB, "application/pdf");
        let err = validate(&request, &UploadPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileTooLarge);
        assert_eq!(err.to_string(), "ファイルサイズが大きすぎます。100MB以下にしてください。");
    }

    #[test]
    fn exactly_max_size_is_accepted() {
        let policy = UploadPolicy {
            max_file_size_bytes: 1024,
            ..UploadPolicy::default()
        };
        assert!(validate(&request_with(1024, "video/mp4"), &policy).is_ok());
        assert!(validate(&request_with(1025, "video/mp4"), &policy).is_err());
    }

    #[test]
    fn unsupported_mime_types_are_rejected() {
        let policy = UploadPolicy::default();
        for mime in ["video/quicktime", "image/png", "application/octet-stream", ""] {
            let err = validate(&request_with(10, mime), &policy).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedType, "mime {:?}", mime);
        }
    }

    #[test]
    fn restricted_mode_only_allows_self_only() {
        let request = request_with(10, "video/mp4").privacy(PrivacyLevel::PublicToEveryone);
        let err = validate(&request, &UploadPolicy::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PrivacyRestricted {
                requested: PrivacyLevel::PublicToEveryone
            }
        );
        assert_eq!(err.kind(), ErrorKind::PrivacyRestriction);

        let open = UploadPolicy {
            restricted_privacy: false,
            ..UploadPolicy::default()
        };
        assert!(validate(&request, &open).is_ok());
    }

    #[test]
    fn privacy_must_be_selected() {
        let mut request = request_with(10, "video/mp4");
        request.privacy_level = None;
        let err = validate(&request, &UploadPolicy::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingPrivacy);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn consent_is_required() {
        let request = request_with(10, "video/mp4").consent(false);
        let err = validate(&request, &UploadPolicy::default()).unwrap_err();
        assert_eq!(err, ValidationError::ConsentRequired);
    }

    #[test]
    fn caption_length_counts_characters() {
        let policy = UploadPolicy {
            max_caption_chars: 3,
            ..UploadPolicy::default()
        };
        assert!(validate(&request_with(10, "video/mp4").caption("踊る猫"), &policy).is_ok());
        let err = validate(&request_with(10, "video/mp4").caption("踊る猫!"), &policy).unwrap_err();
        assert_eq!(err, ValidationError::CaptionTooLong { length: 4, max: 3 });
    }
}
