//! Backend acknowledgements

use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by a durable write.
///
/// The backend decides what an ack contains (the permission table after a
/// grant, `{"ok": true}` after an alias write, ...). The client keeps it as
/// opaque JSON and never derives local state from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);

impl Ack {
    pub fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    /// The raw acknowledgement body.
    pub fn body(&self) -> &serde_json::Value {
        &self.0
    }

    /// True when the backend sent no body at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

impl From<serde_json::Value> for Ack {
    fn from(body: serde_json::Value) -> Self {
        Self(body)
    }
}
