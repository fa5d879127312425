//! Backend status reported by `GET /health`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend health: an overall status plus one flag per optional capability
/// (e.g. `ollama`, `piper`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Everything besides `status`; capability flags are the boolean entries.
    #[serde(flatten)]
    pub capabilities: BTreeMap<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    /// Names of the capabilities reported as enabled.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.capabilities
            .iter()
            .filter(|(_, v)| v.as_bool() == Some(true))
            .map(|(k, _)| k.as_str())
    }

    /// Whether `name` is reported and enabled.
    pub fn has(&self, name: &str) -> bool {
        self.capabilities
            .get(name)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
