//! Tateti engine - tic-tac-toe game state with persisted score tallies
//!
//! The engine owns the board, the player to move, the game status and the
//! running score tally. Rendering lives elsewhere: a presentation layer calls
//! [`GameEngine::place_mark`] and reacts to the returned [`Placement`].
//!
//! # Example
//!
//! ```
//! use tateti_engine::{GameEngine, GameStatus, MemoryStore, Player, WinLine};
//!
//! let mut engine = GameEngine::new(MemoryStore::new());
//! for index in [0, 1, 3, 2] {
//!     engine.place_mark(index).unwrap();
//! }
//! let placement = engine.place_mark(6).unwrap();
//!
//! assert_eq!(placement.status(), &GameStatus::Won(Player::X));
//! assert_eq!(placement.winning_line(), &Some(WinLine::Col0));
//! assert_eq!(engine.scores().x(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod position;
pub mod rules;
mod scores;
mod store;
mod types;

pub use engine::{GameEngine, Persistence, Placement};
pub use error::{PlaceError, StoreError};
pub use position::Position;
pub use rules::WinLine;
pub use scores::{Outcome, ScoreTally};
pub use store::{DEFAULT_RECORD_NAME, JsonFileStore, MemoryStore, ScoreStore};
pub use types::{Board, GameStatus, Player, Square};
