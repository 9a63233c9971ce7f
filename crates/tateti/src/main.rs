//! Tateti - terminal tic-tac-toe with persisted scores.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tateti::{AppConfig, Cli, Command, tui};
use tateti_engine::{GameEngine, JsonFileStore, Persistence};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tateti=debug,tateti_engine=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);
    let config = load_config(&cli)?;

    match command {
        Command::Play => {
            initialize_file_tracing(config.log_file())?;
            tui::run_tui(config)
        }
        Command::Scores => {
            initialize_tracing();
            print_scores(&config)
        }
        Command::ResetScores => {
            initialize_tracing();
            reset_scores(&config)
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;
    if let Some(path) = &cli.scores {
        config = config.with_scores_path(path.clone());
    }
    if let Some(path) = &cli.log_file {
        config = config.with_log_file(path.clone());
    }
    Ok(config)
}

/// Print the tally
#[instrument(skip(config))]
fn print_scores(config: &AppConfig) -> Result<()> {
    let engine = GameEngine::new(JsonFileStore::new(config.scores_path()));
    let scores = engine.scores();
    println!("X: {}  O: {}  Draw: {}", scores.x(), scores.o(), scores.draw());
    Ok(())
}

/// Zero the tally
#[instrument(skip(config))]
fn reset_scores(config: &AppConfig) -> Result<()> {
    let mut engine = GameEngine::new(JsonFileStore::new(config.scores_path()));
    match engine.reset_scores() {
        Persistence::Failed(e) => Err(anyhow::Error::new(e))
            .with_context(|| format!("Resetting {}", config.scores_path().display())),
        Persistence::Saved | Persistence::NotNeeded => {
            info!("Scores reset");
            println!("Scores reset");
            Ok(())
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr for the one-shot commands.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Logs to a file so the TUI screen stays clean.
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Installing the tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_tracing_reports_failures() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let missing = dir.path().join("no-such-dir").join("tateti.log");
        let err = initialize_file_tracing(&missing).unwrap_err();
        assert!(err.to_string().contains("Creating log file"));

        let path = dir.path().join("tateti.log");
        initialize_file_tracing(&path).expect("First install succeeds");
        assert!(path.exists());

        let err = initialize_file_tracing(&path).unwrap_err();
        assert!(err.to_string().contains("Installing the tracing subscriber"));
    }
}
