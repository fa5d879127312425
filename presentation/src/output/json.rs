//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use aios_application::ResolvedChoice;
use aios_domain::{Ack, ChatReply, HealthStatus, ToolCatalog, ToolExecution};
use serde::Serialize;
use serde_json::json;

/// Renders every result as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_reply(&self, reply: &ChatReply) -> String {
        Self::render(reply)
    }

    fn format_catalog(&self, catalog: &ToolCatalog) -> String {
        Self::render(catalog)
    }

    fn format_execution(&self, tool: &str, execution: &ToolExecution) -> String {
        Self::render(&json!({ "tool": tool, "result": execution.result }))
    }

    fn format_resolved(&self, resolved: &ResolvedChoice) -> String {
        Self::render(resolved)
    }

    fn format_ack(&self, action: &str, ack: &Ack) -> String {
        Self::render(&json!({ "action": action, "ack": ack }))
    }

    fn format_health(&self, health: &HealthStatus) -> String {
        Self::render(health)
    }

    fn format_host_output(&self, command: &str, output: &serde_json::Value) -> String {
        Self::render(&json!({ "command": command, "output": output }))
    }
}
