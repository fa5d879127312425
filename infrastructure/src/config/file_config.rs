//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Conversion into the
//! application's typed configuration happens here so callers never touch
//! raw strings.

use aios_application::{BackendConfig, DEFAULT_BASE_URL};
use aios_domain::{ChatOptions, validate_model_hint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("model name {0:?} may only contain visible ASCII characters")]
    InvalidModelName(String),
}

/// `[backend]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the assistant backend
    pub base_url: String,
    /// Per-request timeout; unset means no client-side deadline
    pub timeout_seconds: Option<u64>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

/// `[chat]` section: defaults applied to every chat turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    pub latency_ms: Option<u64>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    #[default]
    Text,
    Json,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackendConfig,
    pub chat: FileChatConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        if let Some(0) = self.backend.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(model) = &self.chat.model {
            if model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
            if validate_model_hint(model).is_err() {
                return Err(ConfigValidationError::InvalidModelName(model.clone()));
            }
        }

        Ok(())
    }

    pub fn to_backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.backend.base_url.trim())
            .with_timeout_seconds(self.backend.timeout_seconds)
    }

    /// Chat defaults from the file; command-line flags layer on top.
    pub fn chat_options(&self) -> ChatOptions {
        let mut options = ChatOptions::default();
        if let Some(ms) = self.chat.latency_ms {
            options = options.with_latency_ms(ms);
        }
        if let Some(model) = &self.chat.model {
            options = options.with_model_hint(model.clone());
        }
        options
    }
}
