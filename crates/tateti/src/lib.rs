//! Tateti - tic-tac-toe in the terminal
//!
//! The game rules and score tally live in [`tateti_engine`]. This crate adds
//! the outer layers:
//!
//! - **Config**: TOML settings for the score file, log file and effect timing
//! - **CLI**: `play`, `scores` and `reset-scores` commands
//! - **TUI**: board, score panel, result modal and confetti

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
pub mod tui;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH};
