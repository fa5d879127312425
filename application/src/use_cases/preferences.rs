//! Preference store use case.
//!
//! Durable writes to the backend's preference memory. Nothing is cached on
//! this side: every read of current bindings goes back to the backend, and
//! no write is applied locally before the backend acknowledges it.

use crate::ports::backend_transport::{BackendRequest, BackendTransport, TransportError};
use aios_domain::{Ack, ClarificationChoice, DefaultBinding};
use std::sync::Arc;
use tracing::debug;

pub const ALIAS_PATH: &str = "/memory/alias";
pub const DEFAULT_PATH: &str = "/memory/default";

/// Use case for durable preference writes.
#[derive(Clone)]
pub struct PreferencesUseCase {
    transport: Arc<dyn BackendTransport>,
}

impl PreferencesUseCase {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Record `choice` for its phrase, optionally as the phrase's default.
    ///
    /// A conflicting default comes back as HTTP 409 from the backend and is
    /// returned unchanged; see
    /// [`ResolveClarificationUseCase`](super::resolve_clarification::ResolveClarificationUseCase)
    /// for the interpretation.
    pub async fn remember_alias(&self, choice: &ClarificationChoice) -> Result<Ack, TransportError> {
        debug!(
            "Remembering '{}' -> '{}' (make_default={}, force={})",
            choice.phrase, choice.choice, choice.make_default, choice.force
        );
        let request = BackendRequest::post("remember alias", ALIAS_PATH, choice)?;
        Ok(Ack::new(self.transport.exchange(request).await?))
    }

    /// Bind an ambiguity kind to a target.
    pub async fn set_default(&self, binding: &DefaultBinding) -> Result<Ack, TransportError> {
        debug!("Setting default {} -> {}", binding.kind, binding.target);
        let request = BackendRequest::post("set default", DEFAULT_PATH, binding)?;
        Ok(Ack::new(self.transport.exchange(request).await?))
    }
}
