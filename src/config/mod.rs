//! Configuration (layered: code > env > TOML file > defaults).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AtelierError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_CAPTION_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Resolved Atelier configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AtelierConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_model: String,
    pub caption_model: String,
    pub video_model: String,
    pub poll_interval: Duration,
    /// Optional ceiling on video status refreshes. `None` polls until the job finishes.
    pub max_polls: Option<u32>,
    /// Per-request HTTP timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    pub history_dir: PathBuf,
}

impl fmt::Debug for AtelierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtelierConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("caption_model", &self.caption_model)
            .field("video_model", &self.video_model)
            .field("poll_interval", &self.poll_interval)
            .field("max_polls", &self.max_polls)
            .field("request_timeout", &self.request_timeout)
            .field("history_dir", &self.history_dir)
            .finish()
    }
}

impl Default for AtelierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
            request_timeout: None,
            history_dir: default_history_dir(),
        }
    }
}

/// On-disk shape of `atelier.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
    image_model: Option<String>,
    caption_model: Option<String>,
    video_model: Option<String>,
    poll_interval_secs: Option<u64>,
    max_polls: Option<u32>,
    request_timeout_secs: Option<u64>,
    history_dir: Option<PathBuf>,
}

impl AtelierConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.merge_file(path)?;
        }
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Overlay keys present in a TOML file.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AtelierError::Configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        self.merge_toml(&raw)
    }

    /// Overlay keys present in a TOML document.
    pub fn merge_toml(&mut self, raw: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(raw)?;
        if let Some(v) = file.api_key {
            self.api_key = Some(v);
        }
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.image_model {
            self.image_model = v;
        }
        if let Some(v) = file.caption_model {
            self.caption_model = v;
        }
        if let Some(v) = file.video_model {
            self.video_model = v;
        }
        if let Some(v) = file.poll_interval_secs {
            self.poll_interval = Duration::from_secs(v);
        }
        if let Some(v) = file.max_polls {
            self.max_polls = Some(v);
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(v));
        }
        if let Some(v) = file.history_dir {
            self.history_dir = v;
        }
        Ok(())
    }

    /// Overlay environment variables resolved through `lookup`.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        // GEMINI_API_KEY wins over GOOGLE_API_KEY
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("GOOGLE_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(v) = lookup("ATELIER_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("ATELIER_IMAGE_MODEL") {
            self.image_model = v;
        }
        if let Some(v) = lookup("ATELIER_CAPTION_MODEL") {
            self.caption_model = v;
        }
        if let Some(v) = lookup("ATELIER_VIDEO_MODEL") {
            self.video_model = v;
        }
        if let Some(v) = lookup("ATELIER_POLL_INTERVAL_SECS") {
            self.poll_interval = Duration::from_secs(parse_number("ATELIER_POLL_INTERVAL_SECS", &v)?);
        }
        if let Some(v) = lookup("ATELIER_MAX_POLLS") {
            self.max_polls = Some(parse_number("ATELIER_MAX_POLLS", &v)?);
        }
        if let Some(v) = lookup("ATELIER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout = Some(Duration::from_secs(parse_number(
                "ATELIER_REQUEST_TIMEOUT_SECS",
                &v,
            )?));
        }
        if let Some(v) = lookup("ATELIER_HISTORY_DIR") {
            self.history_dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = dir.into();
        self
    }

    /// The API key, or an authentication error naming the variables to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AtelierError::Authentication("Missing GEMINI_API_KEY (or GOOGLE_API_KEY)".into())
            })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AtelierError::Configuration(format!("{key} must be a number, got '{value}'")))
}

fn default_history_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".atelier").join("history"))
        .unwrap_or_else(|| PathBuf::from(".atelier/history"))
}
