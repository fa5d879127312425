//! CLI command definitions

use aios_domain::{ToolArguments, validate_model_hint};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for aios
#[derive(Parser, Debug)]
#[command(name = "aios")]
#[command(author, version, about = "Command-line client for the AIOS assistant backend")]
#[command(long_about = r#"
aios talks to a running AIOS assistant backend: chat turns, clarification
choices, tool execution with permission overrides, and stored preferences.

Configuration files are loaded from (in priority order):
1. AIOS_API_BASE / AIOS_<SECTION>__<KEY>   Environment
2. --config <path>                         Explicit config file
3. ./aios.toml                             Project-level config
4. ~/.config/aios/config.toml              Global config

Example:
  aios chat "turn off the lights"
  aios chat "turn off the lights" --choose living_room --remember
  aios tools exec run_cmd_risky --arg cmd=ls --override shell.exec
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the config file's choice, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one chat turn
    Chat(ChatArgs),

    /// List, run and authorize backend tools
    #[command(subcommand)]
    Tools(ToolsCommand),

    /// Record which target a phrase refers to
    Alias(AliasArgs),

    /// Set the default target for a kind of thing (e.g. browser)
    Default {
        kind: String,
        target: String,
    },

    /// Show backend health and optional capabilities
    Health,

    /// Synthesize speech and write the WAV audio to a file
    Speak {
        text: String,
        /// Where to write the audio
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Run a host command (launch_app, hypr_dispatch) in the desktop session
    Host {
        command: String,
        /// Named argument, `key=value`; JSON values are parsed
        #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        args: Vec<(String, Value)>,
    },
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    pub prompt: String,

    /// Latency budget in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Model hint passed to the backend
    #[arg(long, value_name = "MODEL", value_parser = parse_model_hint)]
    pub model: Option<String>,

    /// Answer a clarification with this option id (or free text) and ask again
    #[arg(long, value_name = "ID|TEXT")]
    pub choose: Option<String>,

    /// Keep the chosen option as the phrase's default
    #[arg(long, requires = "choose")]
    pub remember: bool,

    /// Overwrite an existing default
    #[arg(long, requires = "choose")]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// List the backend's tool catalog
    List,

    /// Execute a tool directly
    Exec {
        name: String,
        /// Named argument, `key=value`; JSON values are parsed
        #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        args: Vec<(String, Value)>,
        /// Permission granted for this call only (repeatable)
        #[arg(long = "override", value_name = "PERMISSION")]
        overrides: Vec<String>,
    },

    /// Store a standing allow/deny decision for a permission
    #[command(group(ArgGroup::new("decision").required(true).args(["allow", "deny"])))]
    Permit {
        permission: String,
        #[arg(long)]
        allow: bool,
        #[arg(long)]
        deny: bool,
    },
}

#[derive(Args, Debug)]
pub struct AliasArgs {
    pub phrase: String,
    pub choice: String,

    #[arg(long)]
    pub category: Option<String>,

    /// Also make this the phrase's default
    #[arg(long)]
    pub make_default: bool,

    /// Overwrite an existing default
    #[arg(long)]
    pub force: bool,
}

/// Parse `key=value`. The value is JSON when it parses as JSON, a plain
/// string otherwise.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Accept a model hint only if it can travel in an HTTP header.
pub fn parse_model_hint(raw: &str) -> Result<String, String> {
    validate_model_hint(raw).map_err(|e| e.to_string())?;
    Ok(raw.to_string())
}

/// Collect parsed pairs into tool arguments; later keys win.
pub fn into_arguments(pairs: Vec<(String, Value)>) -> ToolArguments {
    pairs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("room=bedroom").unwrap(),
            ("room".to_string(), json!("bedroom"))
        );
        assert_eq!(
            parse_key_value("args=[\"workspace\",\"2\"]").unwrap(),
            ("args".to_string(), json!(["workspace", "2"]))
        );
        assert_eq!(parse_key_value("n=3").unwrap().1, json!(3));
        assert_eq!(parse_key_value("q=a=b").unwrap().1, json!("a=b"));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_chat_with_choice() {
        let cli = Cli::try_parse_from([
            "aios",
            "chat",
            "turn off the lights",
            "--choose",
            "living_room",
            "--remember",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Chat(args)) => {
                assert_eq!(args.prompt, "turn off the lights");
                assert_eq!(args.choose.as_deref(), Some("living_room"));
                assert!(args.remember);
                assert!(!args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_model_hint_must_be_visible_ascii() {
        let cli = Cli::try_parse_from(["aios", "chat", "hi", "--model", "llama3.1:8b"]).unwrap();
        match cli.command {
            Some(Command::Chat(args)) => assert_eq!(args.model.as_deref(), Some("llama3.1:8b")),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["aios", "chat", "hi", "--model", "llama\nevil"]).is_err());
        assert!(Cli::try_parse_from(["aios", "chat", "hi", "--model", "two words"]).is_err());
    }

    #[test]
    fn test_remember_requires_choose() {
        assert!(Cli::try_parse_from(["aios", "chat", "hi", "--remember"]).is_err());
    }

    #[test]
    fn test_tools_exec_with_overrides() {
        let cli = Cli::try_parse_from([
            "aios",
            "tools",
            "exec",
            "run_cmd_risky",
            "--arg",
            "cmd=ls",
            "--override",
            "shell.exec",
            "--override",
            "fs.read",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Some(Command::Tools(ToolsCommand::Exec {
                name,
                args,
                overrides,
            })) => {
                assert_eq!(name, "run_cmd_risky");
                assert_eq!(into_arguments(args).get("cmd"), Some(&json!("ls")));
                assert_eq!(overrides, vec!["shell.exec", "fs.read"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_permit_needs_exactly_one_decision() {
        assert!(Cli::try_parse_from(["aios", "tools", "permit", "shell.exec"]).is_err());
        assert!(
            Cli::try_parse_from(["aios", "tools", "permit", "shell.exec", "--allow", "--deny"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["aios", "tools", "permit", "shell.exec", "--deny"]).is_ok());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::try_parse_from(["aios", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
