//! Application layer for the AIOS assistant client
//!
//! This crate contains use cases, port definitions, and backend
//! configuration. It depends only on the domain layer.

pub mod client;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use client::AssistantClient;
pub use config::{BackendConfig, DEFAULT_BASE_URL};
pub use ports::{
    backend_transport::{BackendRequest, BackendTransport, HttpMethod, TransportError},
    host_bridge::{HostBridge, HostBridgeError, UnavailableHostBridge},
};
pub use use_cases::chat_turn::{ChatTurnUseCase, ChatTurnError};
pub use use_cases::preferences::PreferencesUseCase;
pub use use_cases::resolve_clarification::{ResolveClarificationUseCase, ResolveError, ResolvedChoice};
pub use use_cases::system_status::SystemStatusUseCase;
pub use use_cases::tool_gateway::{ToolGatewayUseCase, ToolGatewayError};
