use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = ".tiktok-uploader";
const CONFIG_FILE_NAME: &str = "config.toml";
pub const BASE_URL_ENV: &str = "TIKTOK_UPLOADER_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Limits applied to every upload before it reaches the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_caption_chars: usize,
    pub supported_types: Vec<String>,
    pub cooldown_secs: u64,
    /// Unaudited TikTok apps may only post with `SELF_ONLY` visibility.
    pub restricted_privacy: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 100 * 1024 * 1024,
            max_caption_chars: 2200,
            supported_types: ["video/mp4", "video/avi", "video/mov", "video/wmv"]
                .into_iter()
                .map(String::from)
                .collect(),
            cooldown_secs: 5 * 60,
            restricted_privacy: true,
        }
    }
}

impl UploadPolicy {
    /// Out-of-range values saturate; `AppConfig::validate` rejects them.
    pub fn cooldown_window(&self) -> Duration {
        checked_window(self.cooldown_secs).unwrap_or(Duration::MAX)
    }
}

fn checked_window(secs: u64) -> Option<Duration> {
    i64::try_from(secs).ok().and_then(Duration::try_seconds)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub upload: UploadPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3456".into(),
            request_timeout_secs: 30,
            upload: UploadPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from `~/.tiktok-uploader/config.toml`
    /// when it exists. The base URL can be overridden from the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        if self.upload.supported_types.is_empty() {
            return Err(ConfigError::Invalid("upload.supported_types must not be empty".into()));
        }
        if checked_window(self.upload.cooldown_secs).is_none() {
            return Err(ConfigError::Invalid(format!(
                "upload.cooldown_secs is out of range: {}",
                self.upload.cooldown_secs
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_dashboard_limits() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.upload.max_file_size_bytes, 104_857_600);
        assert_eq!(config.upload.max_caption_chars, 2200);
        assert_eq!(config.upload.cooldown_window(), Duration::minutes(5));
        assert!(config.upload.restricted_privacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://dashboard.example.com\"\n\n[upload]\ncooldown_secs = 60"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://dashboard.example.com");
        assert_eq!(config.upload.cooldown_secs, 60);
        assert_eq!(config.upload.max_caption_chars, 2200);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let err = AppConfig::from_file(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = AppConfig {
            base_url: "ftp://example.com".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_cooldown_beyond_duration_range() {
        for secs in [10_000_000_000_000_000, u64::MAX] {
            let mut config = AppConfig::default();
            config.upload.cooldown_secs = secs;
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{}", secs);
            assert_eq!(config.upload.cooldown_window(), Duration::MAX);
        }
    }

    #[test]
    fn huge_cooldown_in_file_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upload]\ncooldown_secs = 10000000000000000").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
