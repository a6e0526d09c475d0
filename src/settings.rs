//! Application settings
//!
//! Layered configuration: built-in defaults, then an optional JSON settings
//! file, then environment variables and command-line flags (via clap).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::categories::CategoryTable;
use crate::logging::LogFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_MODEL_REPO: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_TOKENIZER_REPO: &str = "distilbert-base-uncased";
pub const DEFAULT_REVISION: &str = "main";
pub const DEFAULT_MAX_TOKENS: usize = 512;

const SETTINGS_DIR: &str = "cv-classifier";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_repo")]
    pub repo: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Repo providing `tokenizer.json` (the SST-2 checkpoint ships only a vocab)
    #[serde(default = "default_tokenizer_repo")]
    pub tokenizer_repo: String,
    /// Directory holding config.json, tokenizer.json and model.safetensors; skips the Hub
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            repo: default_model_repo(),
            revision: default_revision(),
            tokenizer_repo: default_tokenizer_repo(),
            local_dir: None,
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub categories: CategoryTable,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            model: ModelSettings::default(),
            categories: CategoryTable::default(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_model_repo() -> String {
    DEFAULT_MODEL_REPO.to_string()
}

fn default_revision() -> String {
    DEFAULT_REVISION.to_string()
}

fn default_tokenizer_repo() -> String {
    DEFAULT_TOKENIZER_REPO.to_string()
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

impl Settings {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit file if given, else the per-user settings file if present,
    /// else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading settings");
            return Self::load(path);
        }

        match default_settings_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading settings");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/cv-classifier/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Flags shared by the server and the CLI. Each one overrides the
/// matching settings-file value when present.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SettingsArgs {
    /// JSON settings file
    #[arg(long, env = "CV_CLASSIFIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hugging Face model repo
    #[arg(long, env = "CV_CLASSIFIER_MODEL")]
    pub model_repo: Option<String>,

    /// Model repo revision
    #[arg(long, env = "CV_CLASSIFIER_REVISION")]
    pub revision: Option<String>,

    /// Hugging Face repo providing tokenizer.json
    #[arg(long, env = "CV_CLASSIFIER_TOKENIZER")]
    pub tokenizer_repo: Option<String>,

    /// Load model files from this directory instead of the Hub
    #[arg(long, env = "CV_CLASSIFIER_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum number of input tokens passed to the model
    #[arg(long, env = "CV_CLASSIFIER_MAX_TOKENS")]
    pub max_tokens: Option<usize>,

    /// Log output format
    #[arg(long, value_enum, env = "CV_CLASSIFIER_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Use a fixed in-process model instead of DistilBERT (no download)
    #[arg(long)]
    pub mock_model: bool,
}

impl SettingsArgs {
    /// Resolve the settings file and apply flag overrides on top.
    pub fn into_settings(self) -> Result<Settings, SettingsError> {
        let settings = Settings::resolve(self.config.as_deref())?;
        Ok(self.apply(settings))
    }

    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(repo) = self.model_repo {
            settings.model.repo = repo;
        }
        if let Some(revision) = self.revision {
            settings.model.revision = revision;
        }
        if let Some(tokenizer_repo) = self.tokenizer_repo {
            settings.model.tokenizer_repo = tokenizer_repo;
        }
        if let Some(dir) = self.model_dir {
            settings.model.local_dir = Some(dir);
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.model.max_tokens = max_tokens;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        settings
    }
}
