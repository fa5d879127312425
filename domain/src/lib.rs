//! Domain layer for the AIOS assistant client
//!
//! This crate contains the value objects of the assistant protocol.
//! It has no dependencies on transport, configuration or presentation.
//!
//! # Core Concepts
//!
//! ## Chat turn
//!
//! One user utterance goes out as a [`ChatRequest`]; the reply is classified
//! into a [`ChatReply`] whose [`ChatOutcome`] is either a direct answer, a
//! tool the backend already ran, a [`Clarification`] the user must resolve,
//! or nothing.
//!
//! ## Clarification
//!
//! A [`ClarificationChoice`] answers a clarification and may ask the backend
//! to remember it as the default for the ambiguous phrase.
//!
//! ## Permissions
//!
//! [`PermissionOverride`] is call-scoped; [`PermissionGrant`] is standing.

pub mod chat;
pub mod core;
pub mod permission;
pub mod preference;
pub mod system;
pub mod tool;

// Re-export commonly used types
pub use chat::{
    ChatMessage, ChatOptions, ChatOutcome, ChatReply, ChatRequest, ChatResponse, Clarification,
    ClarifyOption, Role, validate_model_hint,
};
pub use core::{ack::Ack, error::DomainError, string::truncate};
pub use permission::{PermissionGrant, PermissionOverride};
pub use preference::{ClarificationChoice, DefaultBinding};
pub use system::HealthStatus;
pub use tool::{ToolArguments, ToolCall, ToolCatalog, ToolDescriptor, ToolExecution};
