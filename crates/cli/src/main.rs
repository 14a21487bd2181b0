//! Tradebot CLI
//!
//! Main entry point for the tradebot command-line tool.
//! Serves the chat API, answers one-off questions and feeds the knowledge index.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, ServeCommand, StatusCommand};
use std::path::PathBuf;
use tradebot_core::config::AppConfig;
use tradebot_core::logging::{self, LogFormat};

/// Tradebot - international trade chatbot backend
#[derive(Parser, Debug)]
#[command(name = "tradebot")]
#[command(about = "International trade chatbot backend with RAG and provider fallback", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "TRADEBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeCommand),

    /// Answer one question and exit
    Ask(AskCommand),

    /// Index local documents and reference pages into Pinecone
    Ingest(IngestCommand),

    /// Show which services are available
    Status(StatusCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.clone()).context("Failed to load configuration")?;
    let config = config.with_overrides(cli.log_level, cli.log_format, cli.verbose, cli.no_color);

    let format = LogFormat::parse(&config.log_format).unwrap_or_default();
    logging::init_logging(config.log_level.as_deref(), format, config.no_color)?;

    config.validate()?;

    tracing::info!("Tradebot starting");
    tracing::debug!("Pinecone index: {}", config.pinecone.index_name);
    tracing::debug!(
        "LLM slots: A={} B={}",
        config.llm.primary.vendor,
        config.llm.secondary.vendor
    );

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Ingest(_) => "ingest",
        Commands::Status(_) => "status",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Status(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}
