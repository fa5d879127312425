//! Host Bridge port
//!
//! Named command invocation into the desktop host (launching apps,
//! compositor dispatch). Only a controlled desktop runtime provides one;
//! everywhere else [`UnavailableHostBridge`] answers every call with
//! [`HostBridgeError::UnavailableEnvironment`].

use async_trait::async_trait;
use aios_domain::ToolArguments;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when invoking a host command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostBridgeError {
    #[error("Host bridge unavailable: {0}")]
    UnavailableEnvironment(String),

    #[error("Unknown host command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments for '{command}': {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("Host command '{command}' failed: {reason}")]
    Failed { command: String, reason: String },
}

impl HostBridgeError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, HostBridgeError::UnavailableEnvironment(_))
    }
}

/// Port for host command invocation
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Whether commands can reach a host at all
    fn is_available(&self) -> bool;

    /// Run `command` with named arguments and return its JSON output
    async fn invoke(
        &self,
        command: &str,
        arguments: &ToolArguments,
    ) -> Result<serde_json::Value, HostBridgeError>;
}

/// Bridge used outside a desktop runtime. Fails fast, never degrades.
#[derive(Debug, Clone)]
pub struct UnavailableHostBridge {
    reason: String,
}

impl UnavailableHostBridge {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableHostBridge {
    fn default() -> Self {
        Self::new("not running inside the desktop runtime")
    }
}

#[async_trait]
impl HostBridge for UnavailableHostBridge {
    fn is_available(&self) -> bool {
        false
    }

    async fn invoke(
        &self,
        command: &str,
        _arguments: &ToolArguments,
    ) -> Result<serde_json::Value, HostBridgeError> {
        warn!("Host command '{}' rejected: {}", command, self.reason);
        Err(HostBridgeError::UnavailableEnvironment(format!(
            "cannot run '{}': {}",
            command, self.reason
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_bridge_fails_fast() {
        let bridge = UnavailableHostBridge::default();
        assert!(!bridge.is_available());

        let err = bridge
            .invoke("launch_app", &ToolArguments::new())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(
            err.to_string(),
            "Host bridge unavailable: cannot run 'launch_app': not running inside the desktop runtime"
        );
    }
}
