//! The game-state engine.
//!
//! [`GameEngine`] is the single owner of the board, the player to move, the
//! game status and the score tally. A presentation layer holds one engine per
//! session and only mirrors what the engine reports.

use crate::rules::{is_full, winning_line};
use crate::{
    Board, GameStatus, Outcome, PlaceError, Player, Position, ScoreStore, ScoreTally, Square,
    StoreError, WinLine,
};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// What happened to the score record during an operation.
#[derive(Debug, Clone)]
pub enum Persistence {
    /// Scores did not change, nothing was written.
    NotNeeded,
    /// Scores changed and were written to the store.
    Saved,
    /// Scores changed but the write failed. In-memory scores are still correct.
    Failed(StoreError),
}

impl Persistence {
    /// True when a write was attempted and failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Persistence::Failed(_))
    }
}

/// Report of one successful [`GameEngine::place_mark`].
#[derive(Debug, Clone, Getters)]
pub struct Placement {
    /// Cell that received the mark.
    position: Position,
    /// Player whose mark was placed.
    player: Player,
    /// Status after the placement.
    status: GameStatus,
    /// Completed line when the placement won the game.
    winning_line: Option<WinLine>,
    /// Score record write-through result.
    persistence: Persistence,
}

/// Tic-tac-toe engine with a persisted score tally.
#[derive(Debug)]
pub struct GameEngine<S: ScoreStore> {
    board: Board,
    current: Player,
    status: GameStatus,
    winning_line: Option<WinLine>,
    scores: ScoreTally,
    store: S,
}

impl<S: ScoreStore> GameEngine<S> {
    /// Creates an engine, loading the tally from `store`.
    ///
    /// A missing or unreadable record starts the tally at zero.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        let scores = match store.load() {
            Ok(Some(scores)) => {
                info!(x = scores.x(), o = scores.o(), draw = scores.draw(), "Loaded scores");
                Some(scores)
            }
            Ok(None) => {
                debug!("No persisted scores, starting from zero");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load scores, starting from zero");
                None
            }
        };
        Self::with_scores(store, scores)
    }

    /// Creates an engine with a given tally, without reading `store`.
    #[instrument(skip(store))]
    pub fn with_scores(store: S, scores: Option<ScoreTally>) -> Self {
        Self {
            board: Board::new(),
            current: Player::X,
            status: GameStatus::InProgress,
            winning_line: None,
            scores: scores.unwrap_or_default(),
            store,
        }
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// On a win or draw the tally is updated and written to the store before
    /// returning. A failed write is reported in [`Placement::persistence`],
    /// never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError`] without changing any state when the game is
    /// over, the index is outside the board, or the cell is taken.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn place_mark(&mut self, index: usize) -> Result<Placement, PlaceError> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "Placement rejected, game not active");
            return Err(PlaceError::GameNotActive);
        }

        let position = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Placement rejected, index out of range");
            PlaceError::InvalidIndex(index)
        })?;

        if !self.board.is_empty(position) {
            debug!(%position, "Placement rejected, cell occupied");
            return Err(PlaceError::CellOccupied(position));
        }

        let player = self.current;
        self.board.set(position, Square::Occupied(player));
        debug!(%position, %player, "Mark placed");

        let line = winning_line(&self.board, player);
        let persistence = if let Some(line) = line {
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
            self.conclude(Outcome::Winner(player))
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
            self.conclude(Outcome::Draw)
        } else {
            self.current = player.opponent();
            Persistence::NotNeeded
        };

        Ok(Placement {
            position,
            player,
            status: self.status,
            winning_line: line,
            persistence,
        })
    }

    /// Clears the board for a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.board = Board::new();
        self.current = Player::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        debug!("Game reset");
    }

    /// Zeroes the tally and writes it to the store.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) -> Persistence {
        self.scores.reset();
        info!("Scores reset");
        self.save_scores()
    }

    /// Writes the in-memory tally to the store.
    ///
    /// Use this to retry after a [`Persistence::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    #[instrument(skip(self))]
    pub fn persist_scores(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.scores)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move, or the winner once the game is won.
    pub fn current(&self) -> Player {
        self.current
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the score tally.
    pub fn scores(&self) -> &ScoreTally {
        &self.scores
    }

    /// Line that won the current game, if it was won.
    pub fn winning_line(&self) -> Option<WinLine> {
        self.winning_line
    }

    /// True while placements are accepted.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Marks on the board in the current game.
    pub fn moves_played(&self) -> usize {
        self.board.filled_count()
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn conclude(&mut self, outcome: Outcome) -> Persistence {
        self.scores.record(outcome);
        info!(%outcome, moves = self.board.filled_count(), "Game over");
        self.save_scores()
    }

    fn save_scores(&mut self) -> Persistence {
        match self.store.save(&self.scores) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!(error = %e, "Failed to persist scores, keeping in-memory tally");
                Persistence::Failed(e)
            }
        }
    }
}
