//! Console output formatter

use crate::output::formatter::OutputFormatter;
use aios_application::ResolvedChoice;
use aios_domain::{
    Ack, ChatOutcome, ChatReply, Clarification, HealthStatus, ToolCatalog, ToolExecution,
};
use colored::Colorize;

/// Formats results for an interactive terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn value_text(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    fn clarification(output: &mut String, clarification: &Clarification) {
        output.push_str(&format!(
            "{} {} ({})\n",
            "Which one?".yellow().bold(),
            format!("\"{}\"", clarification.phrase).bold(),
            clarification.kind.dimmed()
        ));

        if clarification.is_open_ended() {
            output.push_str(&format!(
                "  {}\n",
                "No candidates; answer with --choose <text>".dimmed()
            ));
            return;
        }

        for option in &clarification.options {
            let value = option.choice_value().unwrap_or("?");
            let label = option.label();
            if label == value {
                output.push_str(&format!("  * {}", value.green()));
            } else {
                output.push_str(&format!("  * {} {}", value.green(), label));
            }
            if let Some(source) = &option.source {
                output.push_str(&format!(" {}", format!("[{}]", source).dimmed()));
            }
            output.push('\n');
        }
        output.push_str(&format!(
            "  {}\n",
            "Answer with --choose <id> [--remember]".dimmed()
        ));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_reply(&self, reply: &ChatReply) -> String {
        let mut output = String::new();

        match &reply.outcome {
            ChatOutcome::Answer { text } => {
                output.push_str(text);
                output.push('\n');
            }
            ChatOutcome::ToolInvoked { call, result, text } => {
                if let Some(text) = text {
                    output.push_str(text);
                    output.push('\n');
                }
                output.push_str(&format!("{} {}", "Ran".cyan().bold(), call.name.bold()));
                if !call.arguments.is_empty() {
                    let args = serde_json::Value::Object(call.arguments.clone());
                    output.push_str(&format!(" {}", args.to_string().dimmed()));
                }
                output.push('\n');
                if let Some(result) = result {
                    output.push_str(&format!("  {} {}\n", "->".dimmed(), Self::value_text(result)));
                }
            }
            ChatOutcome::Clarify {
                clarification,
                text,
            } => {
                if let Some(text) = text {
                    output.push_str(text);
                    output.push('\n');
                }
                Self::clarification(&mut output, clarification);
            }
            ChatOutcome::Empty => {
                output.push_str(&format!("{}\n", "(no reply)".dimmed()));
            }
        }

        if let Some(note) = &reply.note {
            output.push_str(&format!("{} {}\n", "Note:".yellow(), note));
        }
        if let Some(model) = &reply.model {
            output.push_str(&format!("{}\n", format!("[{}]", model).dimmed()));
        }

        output
    }

    fn format_catalog(&self, catalog: &ToolCatalog) -> String {
        if catalog.is_empty() {
            return format!("{}\n", "No tools available".dimmed());
        }

        let mut output = Self::section_header(&format!("Tools ({})", catalog.len()));
        for tool in catalog.all() {
            output.push_str(&format!("{}", tool.name.bold()));
            if tool.requires_consent() {
                output.push_str(&format!(
                    " {}",
                    format!("[needs: {}]", tool.permissions.join(", ")).yellow()
                ));
            }
            output.push('\n');
            if !tool.description.is_empty() {
                output.push_str(&format!("    {}\n", tool.description));
            }
        }
        output
    }

    fn format_execution(&self, tool: &str, execution: &ToolExecution) -> String {
        format!(
            "{} {}\n{}\n",
            "Ran".cyan().bold(),
            tool.bold(),
            Self::value_text(&execution.result)
        )
    }

    fn format_resolved(&self, resolved: &ResolvedChoice) -> String {
        let mut output = format!(
            "{} \"{}\" -> {}\n",
            "Remembered".green().bold(),
            resolved.phrase,
            resolved.choice.bold()
        );
        if resolved.persisted_default {
            output.push_str(&format!("  {}\n", "saved as default".dimmed()));
        }
        output
    }

    fn format_ack(&self, action: &str, ack: &Ack) -> String {
        if ack.is_empty() {
            format!("{} {}\n", "OK".green().bold(), action)
        } else {
            format!(
                "{} {}\n{}\n",
                "OK".green().bold(),
                action,
                Self::value_text(ack.body()).dimmed()
            )
        }
    }

    fn format_health(&self, health: &HealthStatus) -> String {
        let status = if health.is_ok() {
            health.status.green().bold()
        } else {
            health.status.red().bold()
        };
        let mut output = format!("{} {}\n", "Backend:".cyan().bold(), status);

        for (name, value) in &health.capabilities {
            let mark = match value.as_bool() {
                Some(true) => "on".green(),
                Some(false) => "off".red(),
                None => Self::value_text(value).normal(),
            };
            output.push_str(&format!("  {:<12} {}\n", name, mark));
        }
        output
    }

    fn format_host_output(&self, command: &str, output: &serde_json::Value) -> String {
        let text = Self::value_text(output);
        if text.trim().is_empty() {
            format!("{} {}\n", "OK".green().bold(), command)
        } else {
            format!("{}\n", text.trim_end())
        }
    }
}

/// Force colors off (e.g. `[output] color = false`); otherwise the terminal decides.
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

/// Render an error for stderr.
pub fn format_error(message: &str) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}
