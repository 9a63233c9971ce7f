//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tateti_engine::DEFAULT_RECORD_NAME;
use tracing::{debug, info, instrument};

/// Default location of the config file.
pub const DEFAULT_CONFIG_PATH: &str = "tateti.toml";

/// Settings for the game binary.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Score record file.
    #[serde(default = "default_scores_path")]
    scores_path: PathBuf,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Delay before the victory modal appears.
    #[serde(default = "default_win_modal_delay_ms")]
    win_modal_delay_ms: u64,

    /// Delay before the draw modal appears.
    #[serde(default = "default_draw_modal_delay_ms")]
    draw_modal_delay_ms: u64,

    /// Delay between closing the modal and clearing the board.
    #[serde(default = "default_close_reset_delay_ms")]
    close_reset_delay_ms: u64,

    /// Whether wins throw confetti.
    #[serde(default = "default_confetti")]
    confetti: bool,

    /// Confetti pieces per win.
    #[serde(default = "default_confetti_count")]
    confetti_count: usize,

    /// Gap between consecutive confetti pieces.
    #[serde(default = "default_confetti_stagger_ms")]
    confetti_stagger_ms: u64,

    /// How long each confetti piece lives.
    #[serde(default = "default_confetti_lifetime_ms")]
    confetti_lifetime_ms: u64,
}

fn default_scores_path() -> PathBuf {
    PathBuf::from(format!("{}.json", DEFAULT_RECORD_NAME))
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tateti.log")
}

fn default_win_modal_delay_ms() -> u64 {
    600
}

fn default_draw_modal_delay_ms() -> u64 {
    300
}

fn default_close_reset_delay_ms() -> u64 {
    200
}

fn default_confetti() -> bool {
    true
}

fn default_confetti_count() -> usize {
    50
}

fn default_confetti_stagger_ms() -> u64 {
    30
}

fn default_confetti_lifetime_ms() -> u64 {
    4000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scores_path: default_scores_path(),
            log_file: default_log_file(),
            win_modal_delay_ms: default_win_modal_delay_ms(),
            draw_modal_delay_ms: default_draw_modal_delay_ms(),
            close_reset_delay_ms: default_close_reset_delay_ms(),
            confetti: default_confetti(),
            confetti_count: default_confetti_count(),
            confetti_stagger_ms: default_confetti_stagger_ms(),
            confetti_lifetime_ms: default_confetti_lifetime_ms(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(scores_path = %config.scores_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` when it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the score record path.
    pub fn with_scores_path(mut self, path: PathBuf) -> Self {
        self.scores_path = path;
        self
    }

    /// Replaces the log file path.
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = path;
        self
    }

    /// Delay before the victory modal.
    pub fn win_modal_delay(&self) -> Duration {
        Duration::from_millis(self.win_modal_delay_ms)
    }

    /// Delay before the draw modal.
    pub fn draw_modal_delay(&self) -> Duration {
        Duration::from_millis(self.draw_modal_delay_ms)
    }

    /// Delay between closing the modal and the board reset.
    pub fn close_reset_delay(&self) -> Duration {
        Duration::from_millis(self.close_reset_delay_ms)
    }

    /// Gap between confetti pieces.
    pub fn confetti_stagger(&self) -> Duration {
        Duration::from_millis(self.confetti_stagger_ms)
    }

    /// Lifetime of one confetti piece.
    pub fn confetti_lifetime(&self) -> Duration {
        Duration::from_millis(self.confetti_lifetime_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
