pub mod http;

use crate::upload::request::{UploadRequest, VideoFile};
use async_trait::async_trait;
use thiserror::Error;

pub use self::http::HttpTransport;

pub const FILE_FIELD: &str = "video_file";

/// Multipart body of an upload: the video plus its text fields.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub file: VideoFile,
    pub fields: Vec<(&'static str, String)>,
}

impl UploadForm {
    /// Returns `None` when the request has no file; callers validate first.
    pub fn from_request(request: &UploadRequest) -> Option<Self> {
        let file = request.file.clone()?;
        let privacy = request
            .privacy_level
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();

        Some(Self {
            file,
            fields: vec![
                ("title", request.caption.clone()),
                ("privacy_level", privacy),
                ("user_consent", request.user_consent.to_string()),
                ("disable_comment", request.disable_comment.to_string()),
                ("disable_duet", request.disable_duet.to_string()),
                ("disable_stitch", request.disable_stitch.to_string()),
            ],
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Whatever came back from the server, 2xx or not. A body that could not be
/// read after the status line arrived is kept as `Err` with the read error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Result<String, String>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Raised only when no response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Cannot connect to server: {0}")]
    Connect(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Cannot read upload file: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait TransportClient: Send + Sync {
    async fn post(&self, endpoint: &str, form: UploadForm) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::request::{PrivacyLevel, TargetMode};

    #[test]
    fn form_carries_metadata_fields() {
        let file = VideoFile::from_bytes("a.mp4", "video/mp4", vec![1, 2, 3]);
        let mut request = UploadRequest::new(file, TargetMode::Draft)
            .caption("夏祭り")
            .privacy(PrivacyLevel::SelfOnly)
            .consent(true);
        request.disable_duet = true;

        let form = UploadForm::from_request(&request).unwrap();
        assert_eq!(form.file.name, "a.mp4");
        assert_eq!(form.field("title"), Some("夏祭り"));
        assert_eq!(form.field("privacy_level"), Some("SELF_ONLY"));
        assert_eq!(form.field("user_consent"), Some("true"));
        assert_eq!(form.field("disable_duet"), Some("true"));
        assert_eq!(form.field("disable_comment"), Some("false"));
        assert_eq!(form.field("missing"), None);
    }

    #[test]
    fn form_requires_a_file() {
        let file = VideoFile::from_bytes("a.mp4", "video/mp4", vec![1]);
        let mut request = UploadRequest::new(file, TargetMode::Publish);
        request.file = None;
        assert!(UploadForm::from_request(&request).is_none());
    }

    #[test]
    fn only_2xx_is_success() {
        let ok = TransportResponse { status: 201, body: Ok(String::new()) };
        let redirect = TransportResponse { status: 302, body: Ok(String::new()) };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
