use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listmonk_core::config::{parse_bool, ENV_DEBUG, ENV_LOG_LEVEL};
use listmonk_core::{ListmonkConfig, LogLevel};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;

use commands::{ConnectionArgs, ServeArgs, ToolsArgs};

/// Listmonk MCP server - manage a Listmonk newsletter from any MCP client
#[derive(Parser)]
#[command(
    name = "listmonk-mcp-server",
    version,
    about = "MCP server exposing a Listmonk newsletter instance",
    long_about = "Serves Listmonk subscribers, mailing lists, campaigns, templates and transactional email as Model Context Protocol tools and resources over stdio.\n\nConnection settings come from LISTMONK_MCP_URL, LISTMONK_MCP_USERNAME and LISTMONK_MCP_PASSWORD (the API token)."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load environment variables from this file first
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve(ServeArgs),

    /// Check that Listmonk is reachable with the configured credentials
    Check,

    /// Print the tool catalog as JSON
    Tools(ToolsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.env_file {
        ListmonkConfig::load_env_file(path)?;
    }

    init_logging(resolve_log_level(&cli)?)?;

    match &cli.command {
        None => commands::serve::execute(&ServeArgs::default(), &cli).await,
        Some(Commands::Serve(args)) => commands::serve::execute(args, &cli).await,
        Some(Commands::Check) => commands::check::execute(&cli).await,
        Some(Commands::Tools(args)) => commands::tools::execute(args),
    }
}

/// Flags win over `LISTMONK_MCP_LOG_LEVEL`; the debug switch wins over both.
fn resolve_log_level(cli: &Cli) -> Result<LogLevel> {
    if cli.verbose {
        return Ok(LogLevel::Debug);
    }
    if cli.quiet {
        return Ok(LogLevel::Error);
    }

    if let Ok(raw) = std::env::var(ENV_DEBUG) {
        if parse_bool(ENV_DEBUG, &raw)? {
            return Ok(LogLevel::Debug);
        }
    }

    if let Some(level) = cli.log_level {
        return Ok(level);
    }
    match std::env::var(ENV_LOG_LEVEL) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {}", ENV_LOG_LEVEL)),
        Err(_) => Ok(LogLevel::default()),
    }
}

/// Logs go to stderr; stdout carries the MCP stdio transport.
fn init_logging(level: LogLevel) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(level.as_filter()))
        .with_writer(std::io::stderr)
        .with_ansi(is_terminal::is_terminal(std::io::stderr()))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
