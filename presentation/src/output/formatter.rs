//! Output formatter trait

use aios_application::ResolvedChoice;
use aios_domain::{Ack, ChatReply, HealthStatus, ToolCatalog, ToolExecution};

/// Trait for rendering command results
pub trait OutputFormatter {
    /// Format a classified chat reply
    fn format_reply(&self, reply: &ChatReply) -> String;

    /// Format the tool catalog
    fn format_catalog(&self, catalog: &ToolCatalog) -> String;

    /// Format a tool execution result
    fn format_execution(&self, tool: &str, execution: &ToolExecution) -> String;

    /// Format a resolved clarification
    fn format_resolved(&self, resolved: &ResolvedChoice) -> String;

    /// Format a backend acknowledgement for `action`
    fn format_ack(&self, action: &str, ack: &Ack) -> String;

    /// Format backend health
    fn format_health(&self, health: &HealthStatus) -> String;

    /// Format a host command's output
    fn format_host_output(&self, command: &str, output: &serde_json::Value) -> String;
}
