//! Infrastructure layer for the aios client
//!
//! Adapters for the ports defined in the application layer: the HTTP
//! transport to the assistant backend, the process-backed host bridge,
//! and configuration file loading.

pub mod config;
pub mod host;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileChatConfig, FileConfig,
    FileOutputConfig, FileOutputFormat,
};
pub use host::{HostCommand, ProcessHostBridge, detect_host_bridge};
pub use http::HttpTransport;
