//! CLI entrypoint for aios
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use aios_application::{AssistantClient, ResolveError};
use aios_domain::{
    ChatOptions, ChatOutcome, ClarificationChoice, DefaultBinding, PermissionGrant,
    PermissionOverride, ToolCall, truncate,
};
use aios_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, HttpTransport, detect_host_bridge,
};
use aios_presentation::{
    AliasArgs, ChatArgs, Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat,
    OutputFormatter, ToolsCommand, format_error, into_arguments, set_color_enabled,
};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    config.validate().context("invalid configuration")?;

    set_color_enabled(config.output.color);
    let formatter = formatter_for(&cli, &config);

    let Some(command) = cli.command else {
        bail!("no command given; try `aios --help`");
    };

    match command {
        // Host commands never touch the backend
        Command::Host { command, args } => {
            let bridge = detect_host_bridge();
            let output = bridge.invoke(&command, &into_arguments(args)).await?;
            println!("{}", formatter.format_host_output(&command, &output));
        }
        Command::Chat(args) => {
            let client = connect(&config)?;
            chat(&client, &config, args, formatter.as_ref()).await?;
        }
        Command::Tools(tools) => {
            let client = connect(&config)?;
            run_tools(&client, tools, formatter.as_ref()).await?;
        }
        Command::Alias(args) => {
            let client = connect(&config)?;
            alias(&client, args, formatter.as_ref()).await?;
        }
        Command::Default { kind, target } => {
            let client = connect(&config)?;
            let ack = client
                .preferences()
                .set_default(&DefaultBinding::new(kind, target))
                .await?;
            println!("{}", formatter.format_ack("set default", &ack));
        }
        Command::Health => {
            let health = connect(&config)?.system().health().await?;
            println!("{}", formatter.format_health(&health));
        }
        Command::Speak { text, out } => {
            let audio = connect(&config)?.system().speak(&text).await?;
            tokio::fs::write(&out, &audio)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!("Wrote {} bytes of audio to {}", audio.len(), out.display());
            println!("{}", out.display());
        }
    }

    Ok(())
}

// === Dependency Injection ===
fn connect(config: &FileConfig) -> Result<AssistantClient> {
    let backend = config.to_backend_config();
    info!("Using backend at {}", backend.base_url);
    let transport = Arc::new(HttpTransport::new(backend)?);
    Ok(AssistantClient::new(transport))
}

fn formatter_for(cli: &Cli, config: &FileConfig) -> Box<dyn OutputFormatter> {
    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// One chat turn. With `--choose`, a clarify outcome is resolved and the
/// same prompt is sent once more.
async fn chat(
    client: &AssistantClient,
    config: &FileConfig,
    args: ChatArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut options: ChatOptions = config.chat_options();
    if let Some(ms) = args.latency_ms {
        options = options.with_latency_ms(ms);
    }
    if let Some(model) = args.model {
        options = options.with_model_hint(model);
    }

    let reply = client.chat().send_turn(&args.prompt, &options).await?;
    println!("{}", formatter.format_reply(&reply));

    let Some(choice) = args.choose else {
        return Ok(());
    };
    let ChatOutcome::Clarify { clarification, .. } = &reply.outcome else {
        warn!("--choose ignored: the reply did not ask for clarification");
        return Ok(());
    };

    debug!(
        "Resolving '{}' with '{}'",
        clarification.phrase,
        truncate(&choice, 40)
    );
    let resolved = client
        .resolver()
        .resolve_option(clarification, &choice, args.remember, args.force)
        .await
        .map_err(conflict_hint)?;
    println!("{}", formatter.format_resolved(&resolved));

    let retry = client.chat().send_turn(&args.prompt, &options).await?;
    println!("{}", formatter.format_reply(&retry));
    Ok(())
}

async fn alias(
    client: &AssistantClient,
    args: AliasArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut choice = ClarificationChoice::new(args.choice, args.phrase);
    if let Some(category) = args.category {
        choice = choice.with_category(category);
    }
    if args.make_default {
        choice = choice.remembered();
    }
    if args.force {
        choice = choice.forced();
    }

    let resolved = client
        .resolver()
        .resolve(choice)
        .await
        .map_err(conflict_hint)?;
    println!("{}", formatter.format_resolved(&resolved));
    Ok(())
}

async fn run_tools(
    client: &AssistantClient,
    command: ToolsCommand,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    match command {
        ToolsCommand::List => {
            let catalog = client.tools().list_tools().await?;
            println!("{}", formatter.format_catalog(&catalog));
        }
        ToolsCommand::Exec {
            name,
            args,
            overrides,
        } => {
            let call = ToolCall::new(name).with_arguments(into_arguments(args));
            let overrides: PermissionOverride = overrides.into_iter().collect();
            let overrides = (!overrides.is_empty()).then_some(&overrides);

            let execution = client.tools().execute(&call, overrides).await?;
            println!("{}", formatter.format_execution(&call.name, &execution));
        }
        ToolsCommand::Permit {
            permission,
            allow,
            deny: _,
        } => {
            let grant = if allow {
                PermissionGrant::allow(permission)
            } else {
                PermissionGrant::deny(permission)
            };
            let ack = client.tools().set_permission(&grant).await?;
            println!("{}", formatter.format_ack("set permission", &ack));
        }
    }
    Ok(())
}

fn conflict_hint(err: ResolveError) -> anyhow::Error {
    if err.is_conflict() {
        anyhow!("{} (rerun with --force to overwrite it)", err)
    } else {
        err.into()
    }
}
