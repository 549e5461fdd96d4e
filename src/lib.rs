//! rTimestore library root.
//! Exposes the CLI parser, the high-level run() function and the storage,
//! container and mutation modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Show { .. } => commands::show::handle(cmd, cfg).await,
        Commands::List { .. } => commands::list::handle(cmd, cfg).await,
        Commands::Add { .. } => commands::add::handle(cmd, cfg).await,
        Commands::Edit { .. } => commands::edit::handle(cmd, cfg).await,
        Commands::Durations { .. } => commands::durations::handle(cmd, cfg).await,
        Commands::Lunch { .. } => commands::lunch::handle(cmd, cfg).await,
        Commands::Internal { .. } => commands::internal::handle(cmd, cfg).await,
        Commands::Del { .. } => commands::del::handle(cmd, cfg).await,
    }
}

/// `RTIMESTORE_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RTIMESTORE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(Some(custom_db))
            .to_string_lossy()
            .to_string();
    }

    init_tracing(&cfg.log_level);

    dispatch(&cli, &cfg).await
}
