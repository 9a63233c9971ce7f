//! Error types for mark placement and score persistence.

use crate::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// Rejected placement. Every variant leaves the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlaceError {
    /// Index outside 0-8. A caller bug rather than a player action.
    #[display("Cell index {} is outside the board (must be 0-8)", _0)]
    InvalidIndex(usize),

    /// The square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game is already won or drawn.
    #[display("Game is not active")]
    GameNotActive,
}

impl std::error::Error for PlaceError {}

/// Score storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}
