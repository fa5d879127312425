//! Presentation layer for the aios client
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    AliasArgs, ChatArgs, Cli, Command, OutputFormat, ToolsCommand, into_arguments,
};
pub use output::console::{ConsoleFormatter, format_error, set_color_enabled};
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
