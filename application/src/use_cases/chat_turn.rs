//! Chat turn use case.
//!
//! Sends one user utterance to `/chat` and classifies the reply. The caller
//! decides what to do with a clarification; this use case never follows up
//! on its own.

use crate::ports::backend_transport::{BackendRequest, BackendTransport, TransportError};
use aios_domain::chat::{
    ChatOptions, ChatReply, ChatRequest, ChatResponse, LATENCY_PARAM, MODEL_HEADER,
    validate_model_hint,
};
use aios_domain::{DomainError, truncate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const CHAT_PATH: &str = "/chat";
const OPERATION: &str = "chat turn";

/// Errors that can occur during a chat turn.
#[derive(Error, Debug)]
pub enum ChatTurnError {
    /// The backend rejected the turn or could not be reached. Unwrapped so
    /// the status and body stay intact.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered with something the protocol cannot represent,
    /// or the turn itself cannot be carried (e.g. an invalid model hint).
    #[error(transparent)]
    Contract(#[from] DomainError),
}

/// Use case for a single chat turn.
#[derive(Clone)]
pub struct ChatTurnUseCase {
    transport: Arc<dyn BackendTransport>,
}

impl ChatTurnUseCase {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Send `prompt` as one user message.
    ///
    /// An empty prompt is forwarded unchanged; the backend decides what it
    /// means.
    pub async fn send_turn(
        &self,
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<ChatReply, ChatTurnError> {
        self.send(&ChatRequest::user_turn(prompt, options)).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatTurnError> {
        let prompt = request
            .messages()
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        debug!(
            "Chat turn: '{}' (latency_ms={:?}, model={:?})",
            truncate(prompt, 80),
            request.latency_ms(),
            request.model_hint()
        );

        if let Some(model) = request.model_hint() {
            validate_model_hint(model)?;
        }
        let raw = self.transport.exchange(Self::backend_request(request)?).await?;

        let response: ChatResponse = serde_json::from_value(raw).map_err(|e| {
            DomainError::ContractViolation(format!("malformed chat reply: {}", e))
        })?;
        let reply = ChatReply::classify(response)?;

        info!("Chat turn classified as {}", reply.outcome.as_str());
        Ok(reply)
    }

    fn backend_request(request: &ChatRequest) -> Result<BackendRequest, TransportError> {
        let mut backend = BackendRequest::post(OPERATION, CHAT_PATH, request)?;
        if let Some(latency_ms) = request.latency_ms() {
            backend = backend.with_query(LATENCY_PARAM, latency_ms);
        }
        if let Some(model) = request.model_hint() {
            backend = backend.with_header(MODEL_HEADER, model);
        }
        Ok(backend)
    }
}
