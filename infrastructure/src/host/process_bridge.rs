//! Process-backed [`HostBridge`] for a Hyprland desktop session.
//!
//! Two commands are understood:
//!
//! - `launch_app {cmd, args}` spawns `cmd` detached and returns immediately.
//! - `hypr_dispatch {args}` runs `hyprctl dispatch <args…>` and returns its stdout.
//!
//! Arguments are checked before anything is spawned.

use aios_application::{HostBridge, HostBridgeError, UnavailableHostBridge};
use aios_domain::ToolArguments;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const LAUNCH_APP: &str = "launch_app";
pub const HYPR_DISPATCH: &str = "hypr_dispatch";

/// Set by the compositor inside a Hyprland session
pub const HOST_SESSION_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

const HYPRCTL: &str = "hyprctl";

/// A validated host command, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    LaunchApp { cmd: String, args: Vec<String> },
    HyprDispatch { args: Vec<String> },
}

impl HostCommand {
    /// Validate a named command and its arguments.
    pub fn parse(command: &str, arguments: &ToolArguments) -> Result<Self, HostBridgeError> {
        match command {
            LAUNCH_APP => {
                let cmd = arguments
                    .get("cmd")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|cmd| !cmd.is_empty())
                    .ok_or_else(|| invalid(command, "'cmd' must be a non-empty string"))?;
                // `cmd` may carry leading arguments ("flatpak run org.mozilla.firefox").
                // Words are split on whitespace; no quoting or expansion.
                let mut words = cmd.split_whitespace().map(str::to_string);
                let program = words
                    .next()
                    .ok_or_else(|| invalid(command, "'cmd' must be a non-empty string"))?;
                let mut argv: Vec<String> = words.collect();
                argv.extend(string_list(command, arguments.get("args"))?);
                Ok(HostCommand::LaunchApp {
                    cmd: program,
                    args: argv,
                })
            }
            HYPR_DISPATCH => {
                let args = string_list(command, arguments.get("args"))?;
                if args.is_empty() {
                    return Err(invalid(command, "'args' needs at least a dispatcher name"));
                }
                Ok(HostCommand::HyprDispatch { args })
            }
            other => Err(HostBridgeError::UnknownCommand(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::LaunchApp { .. } => LAUNCH_APP,
            HostCommand::HyprDispatch { .. } => HYPR_DISPATCH,
        }
    }

    fn program(&self) -> (&str, Vec<&str>) {
        match self {
            HostCommand::LaunchApp { cmd, args } => {
                (cmd.as_str(), args.iter().map(String::as_str).collect())
            }
            HostCommand::HyprDispatch { args } => {
                let mut argv = vec!["dispatch"];
                argv.extend(args.iter().map(String::as_str));
                (HYPRCTL, argv)
            }
        }
    }
}

fn invalid(command: &str, reason: &str) -> HostBridgeError {
    HostBridgeError::InvalidArguments {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

/// Missing `args` is an empty list; anything but an array of strings is rejected.
fn string_list(command: &str, value: Option<&Value>) -> Result<Vec<String>, HostBridgeError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(command, "'args' must contain only strings"))
            })
            .collect(),
        Some(_) => Err(invalid(command, "'args' must be an array of strings")),
    }
}

/// Runs host commands as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessHostBridge;

impl ProcessHostBridge {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, command: HostCommand) -> Result<Value, HostBridgeError> {
        let name = command.name();
        let (program, argv) = command.program();
        debug!("host {}: {} {:?}", name, program, argv);

        let failed = |reason: String| HostBridgeError::Failed {
            command: name.to_string(),
            reason,
        };

        match &command {
            HostCommand::LaunchApp { .. } => {
                // Detached: the child outlives this call and its output is discarded.
                let child = Command::new(program)
                    .args(&argv)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(|e| failed(format!("failed to spawn '{}': {}", program, e)))?;
                info!("launched '{}' (pid {:?})", program, child.id());
                Ok(json!({ "launched": program, "pid": child.id() }))
            }
            HostCommand::HyprDispatch { .. } => {
                let output = Command::new(program)
                    .args(&argv)
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(|e| failed(format!("failed to run {}: {}", HYPRCTL, e)))?;

                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    let detail = if stderr.trim().is_empty() {
                        stdout.trim().to_string()
                    } else {
                        stderr.trim().to_string()
                    };
                    return Err(failed(format!(
                        "{} exited with {}: {}",
                        HYPRCTL, output.status, detail
                    )));
                }
                Ok(Value::String(stdout))
            }
        }
    }
}

#[async_trait]
impl HostBridge for ProcessHostBridge {
    fn is_available(&self) -> bool {
        true
    }

    async fn invoke(&self, command: &str, arguments: &ToolArguments) -> Result<Value, HostBridgeError> {
        let command = HostCommand::parse(command, arguments)?;
        self.run(command).await
    }
}

/// Pick the bridge for the current environment.
pub fn detect_host_bridge() -> Arc<dyn HostBridge> {
    bridge_for(std::env::var_os(HOST_SESSION_ENV).is_some_and(|v| !v.is_empty()))
}

fn bridge_for(in_session: bool) -> Arc<dyn HostBridge> {
    if in_session {
        Arc::new(ProcessHostBridge::new())
    } else {
        warn!("{} is not set; host commands are unavailable", HOST_SESSION_ENV);
        Arc::new(UnavailableHostBridge::new(format!(
            "no desktop session detected ({} is not set)",
            HOST_SESSION_ENV
        )))
    }
}
