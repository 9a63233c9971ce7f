//! Command-line interface for tateti.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tateti - tic-tac-toe in the terminal with persisted scores
#[derive(Parser, Debug)]
#[command(name = "tateti")]
#[command(about = "Tic-tac-toe in the terminal with persisted scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Score record file (overrides the config file)
    #[arg(long, global = true)]
    pub scores: Option<PathBuf>,

    /// Log file for the terminal UI (overrides the config file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the score tally
    Scores,

    /// Zero the score tally
    ResetScores,
}
