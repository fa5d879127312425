//! Chat turn protocol types
//!
//! - [`request`] - what a turn sends (one user message, latency, model hint)
//! - [`response`] - what comes back and how it is classified

pub mod request;
pub mod response;

pub use request::{
    ChatMessage, ChatOptions, ChatRequest, LATENCY_PARAM, MODEL_HEADER, Role, validate_model_hint,
};
pub use response::{ChatOutcome, ChatReply, ChatResponse, Clarification, ClarifyOption};
