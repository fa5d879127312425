//! Tool domain module
//!
//! Tools run on the backend. The client only names them ([`ToolCall`]),
//! reads what exists ([`ToolCatalog`] of [`ToolDescriptor`]s) and receives
//! their output ([`ToolExecution`]). Whether a call may run is decided by
//! permissions, see [`crate::permission`].

pub mod entities;

pub use entities::{ToolArguments, ToolCall, ToolCatalog, ToolDescriptor, ToolExecution};
