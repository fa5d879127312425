//! Use cases (application services)
//!
//! Each use case wraps one `Arc<dyn BackendTransport>`, is cheap to clone,
//! and holds no other state, so any of them may run concurrently.

pub mod chat_turn;
pub mod preferences;
pub mod resolve_clarification;
pub mod system_status;
pub mod tool_gateway;
