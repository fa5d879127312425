//! Application-level configuration.
//!
//! - [`BackendConfig`] - where the assistant backend lives and how long a
//!   single exchange may take

pub mod backend;

pub use backend::{BackendConfig, DEFAULT_BASE_URL};
