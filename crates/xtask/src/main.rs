//! Development tasks for the arena agent
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo run -p xtask -- <command>`

mod commands;
mod utils;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{CheckConfig, Replay};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Development tasks for the arena agent
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the arena agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `xtask.log` in this directory
    #[arg(long, global = true, value_name = "DIR", env = "ARENA_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the agent over a recorded match and print its commands
    Replay(Replay),

    /// Load and validate configuration and lane files
    CheckConfig(CheckConfig),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ARENA_DATA_DIR, RUST_LOG and friends)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::CheckConfig(cmd) => cmd.execute(),
    }
}

/// Installs the stderr subscriber plus an optional file layer.
///
/// The returned guard flushes the file writer on drop and must outlive every
/// log call.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "xtask.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/xtask.log", dir.display());
    }
    Ok(guard)
}
