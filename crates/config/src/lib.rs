//! Configuration loading and validation for Sportello.
//!
//! Loads `~/.sportello/config.toml` with environment variable overrides
//! (`SPORTELLO_*`). Every knob has a serde default, so a missing file or an
//! empty table yields a fully usable configuration. Nothing is ever written
//! back — the config file is read-only input.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// The root configuration structure. Maps to `~/.sportello/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine model identifier passed to `ollama run`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Startup mode: `helpdesk` or `tutor`.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Startup language preference: `auto`, `it`, or `es`.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Free-form temperature guidance placed in the prompt meta line.
    /// Not a sampling parameter — the subprocess engine takes none.
    #[serde(default = "default_temperature_hint")]
    pub temperature_hint: f32,

    /// Conversation window: the prompt carries the last `2 × max_turns`
    /// history entries.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// File ingestion ceilings.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Web ingestion settings.
    #[serde(default)]
    pub web: WebConfig,
}

fn default_model() -> String {
    "llama3.2".into()
}
fn default_mode() -> String {
    "helpdesk".into()
}
fn default_lang() -> String {
    "auto".into()
}
fn default_temperature_hint() -> f32 {
    0.2
}
fn default_max_turns() -> usize {
    10
}

/// Size ceilings for the file ingestion sub-pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Characters of document text admitted into a prompt.
    #[serde(default = "default_file_max_chars")]
    pub file_max_chars: usize,

    /// Byte ceiling for raw text reads, checked before any read attempt.
    #[serde(default = "default_file_read_max_bytes")]
    pub file_read_max_bytes: u64,

    /// Pages read from a PDF.
    #[serde(default = "default_pdf_max_pages")]
    pub pdf_max_pages: usize,

    /// Paragraphs read from a DOCX.
    #[serde(default = "default_docx_max_paras")]
    pub docx_max_paras: usize,
}

fn default_file_max_chars() -> usize {
    12_000
}
fn default_file_read_max_bytes() -> u64 {
    5_000_000
}
fn default_pdf_max_pages() -> usize {
    25
}
fn default_docx_max_paras() -> usize {
    1500
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            file_max_chars: default_file_max_chars(),
            file_read_max_bytes: default_file_read_max_bytes(),
            pdf_max_pages: default_pdf_max_pages(),
            docx_max_paras: default_docx_max_paras(),
        }
    }
}

/// Web search and fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Search results requested per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Wall-clock timeout for the HTTP fetch — the only operation with an
    /// explicit deadline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Characters of page text admitted as a source excerpt.
    #[serde(default = "default_web_max_chars")]
    pub max_chars: usize,

    /// Startup value of the auto-search heuristic flag.
    #[serde(default)]
    pub webmode: bool,
}

fn default_top_k() -> usize {
    5
}
fn default_timeout_secs() -> u64 {
    12
}
fn default_web_max_chars() -> usize {
    6000
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            timeout_secs: default_timeout_secs(),
            max_chars: default_web_max_chars(),
            webmode: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            mode: default_mode(),
            lang: default_lang(),
            temperature_hint: default_temperature_hint(),
            max_turns: default_max_turns(),
            limits: LimitsConfig::default(),
            web: WebConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl AppConfig {
    /// The configuration directory: `$SPORTELLO_CONFIG_DIR` or
    /// `~/.sportello`.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("SPORTELLO_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sportello")
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// `SPORTELLO_MODEL`, `SPORTELLO_MODE`, `SPORTELLO_LANG`,
    /// `SPORTELLO_WEBMODE` override the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("SPORTELLO_MODEL")
            && !model.trim().is_empty()
        {
            self.model = model;
        }
        if let Ok(mode) = std::env::var("SPORTELLO_MODE") {
            self.mode = mode;
        }
        if let Ok(lang) = std::env::var("SPORTELLO_LANG") {
            self.lang = lang;
        }
        if let Ok(webmode) = std::env::var("SPORTELLO_WEBMODE") {
            self.web.webmode = matches!(webmode.to_lowercase().as_str(), "on" | "true" | "1");
        }
    }

    /// Reject values outside their enumerated domains at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.mode.to_lowercase().as_str(), "helpdesk" | "tutor") {
            return Err(ConfigError::InvalidValue {
                field: "mode",
                value: self.mode.clone(),
            });
        }
        if !matches!(self.lang.to_lowercase().as_str(), "auto" | "it" | "es") {
            return Err(ConfigError::InvalidValue {
                field: "lang",
                value: self.lang.clone(),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_turns",
                value: "0".into(),
            });
        }
        Ok(())
    }
}
