//! Outbound half of a chat turn.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the caller's model hint. Never part of the JSON body.
pub const MODEL_HEADER: &str = "X-AIOS-Model";

/// Query parameter carrying the latency budget in whole milliseconds.
pub const LATENCY_PARAM: &str = "latency_ms";

/// Check that `hint` can travel in the model header: non-empty, visible
/// ASCII only (no spaces or control characters).
pub fn validate_model_hint(hint: &str) -> Result<(), DomainError> {
    if hint.is_empty() || !hint.chars().all(|c| c.is_ascii_graphic()) {
        return Err(DomainError::InvalidModelHint(hint.to_string()));
    }
    Ok(())
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single message in a chat request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Optional tuning for one chat turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Latency budget the backend should shape its answer to.
    pub latency: Option<Duration>,
    /// Model identifier passed through to the backend untouched.
    pub model_hint: Option<String>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_latency_ms(self, millis: u64) -> Self {
        self.with_latency(Duration::from_millis(millis))
    }

    pub fn with_model_hint(mut self, model: impl Into<String>) -> Self {
        self.model_hint = Some(model.into());
        self
    }
}

/// A chat request, frozen at construction.
///
/// Only `messages` is serialized; the latency budget and model hint travel
/// as query parameter and header respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    latency: Option<Duration>,
    #[serde(skip)]
    model_hint: Option<String>,
}

impl ChatRequest {
    /// One user turn. Prior turns are not threaded automatically.
    pub fn user_turn(prompt: impl Into<String>, options: &ChatOptions) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            latency: options.latency,
            model_hint: options.model_hint.clone(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Latency budget in whole milliseconds (sub-millisecond parts dropped).
    pub fn latency_ms(&self) -> Option<u64> {
        self.latency
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn model_hint(&self) -> Option<&str> {
        self.model_hint.as_deref()
    }
}
