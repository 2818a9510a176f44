use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where the bytes of a video come from.
#[derive(Debug, Clone)]
pub enum VideoSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct VideoFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub source: VideoSource,
}

impl VideoFile {
    /// Describe a file on disk. Only metadata is read here; the content is
    /// loaded by the transport when the upload is actually sent.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Cannot read video file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            mime_type: mime_type_for(path).to_string(),
            name,
            size_bytes: metadata.len(),
            source: VideoSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: data.len() as u64,
            mime_type: mime_type.into(),
            source: VideoSource::Memory(data),
        }
    }
}

/// MIME type by extension, using the same names the dashboard's file input reported.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/mov",
        "wmv" => "video/wmv",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyLevel {
    SelfOnly,
    PublicToEveryone,
    MutualFollowFriends,
    FollowerOfCreator,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfOnly => "SELF_ONLY",
            Self::PublicToEveryone => "PUBLIC_TO_EVERYONE",
            Self::MutualFollowFriends => "MUTUAL_FOLLOW_FRIENDS",
            Self::FollowerOfCreator => "FOLLOWER_OF_CREATOR",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SELF_ONLY" | "SELF" | "PRIVATE" => Ok(Self::SelfOnly),
            "PUBLIC_TO_EVERYONE" | "PUBLIC" => Ok(Self::PublicToEveryone),
            "MUTUAL_FOLLOW_FRIENDS" | "FRIENDS" => Ok(Self::MutualFollowFriends),
            "FOLLOWER_OF_CREATOR" | "FOLLOWERS" => Ok(Self::FollowerOfCreator),
            other => Err(format!("Unknown privacy level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    Publish,
    Draft,
}

impl TargetMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Publish => "/api/upload-video",
            Self::Draft => "/api/upload-draft",
        }
    }

    /// Prefix used in progress labels and button captions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Publish => "直接投稿",
            Self::Draft => "下書き投稿",
        }
    }
}

/// One upload attempt as entered by the user.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: Option<VideoFile>,
    pub caption: String,
    pub privacy_level: Option<PrivacyLevel>,
    pub user_consent: bool,
    pub target_mode: TargetMode,
    pub disable_comment: bool,
    pub disable_duet: bool,
    pub disable_stitch: bool,
}

impl UploadRequest {
    pub fn new(file: VideoFile, target_mode: TargetMode) -> Self {
        Self {
            file: Some(file),
            caption: String::new(),
            privacy_level: Some(PrivacyLevel::SelfOnly),
            user_consent: false,
            target_mode,
            disable_comment: false,
            disable_duet: false,
            disable_stitch: false,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn privacy(mut self, level: PrivacyLevel) -> Self {
        self.privacy_level = Some(level);
        self
    }

    pub fn consent(mut self, consent: bool) -> Self {
        self.user_consent = consent;
        self
    }
}
