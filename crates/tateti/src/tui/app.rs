//! Application state and logic.
//!
//! [`App`] mirrors the engine for rendering. It reacts to key presses and
//! clock ticks; all game state changes go through the engine.

use super::confetti::Confetti;
use super::input::{Action, action_for, move_cursor};
use super::modal::Modal;
use super::schedule::Schedule;
use crate::config::AppConfig;
use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tateti_engine::{GameEngine, GameStatus, Outcome, Persistence, Position, ScoreStore};
use tracing::{debug, info, instrument, warn};

/// Timed presentation effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Open the result modal.
    ShowModal(Outcome),
    /// Clear the board for the next game.
    ResetGame,
}

/// Whether the loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep going.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App<S: ScoreStore> {
    engine: GameEngine<S>,
    config: AppConfig,
    cursor: Position,
    modal: Option<Modal>,
    confetti: Confetti,
    schedule: Schedule<Deferred>,
    status_message: Option<String>,
    rng: ChaCha8Rng,
}

impl<S: ScoreStore> App<S> {
    /// Creates the app around an engine.
    #[instrument(skip(engine, config))]
    pub fn new(engine: GameEngine<S>, config: AppConfig) -> Self {
        Self::with_rng(engine, config, ChaCha8Rng::from_entropy())
    }

    /// Creates the app with a fixed confetti RNG.
    #[instrument(skip(engine, config, rng))]
    pub fn with_rng(engine: GameEngine<S>, config: AppConfig, rng: ChaCha8Rng) -> Self {
        Self {
            engine,
            config,
            cursor: Position::Center,
            modal: None,
            confetti: Confetti::new(),
            schedule: Schedule::new(),
            status_message: None,
            rng,
        }
    }

    /// Gets the engine.
    pub fn engine(&self) -> &GameEngine<S> {
        &self.engine
    }

    /// Focused cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Open modal, if any.
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Live confetti.
    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Pending timed effects.
    pub fn schedule(&self) -> &Schedule<Deferred> {
        &self.schedule
    }

    /// Warning to show under the board.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Handles one key press at time `now`.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> Control {
        match action_for(key, self.modal.is_some()) {
            Action::Cursor(direction) => self.cursor = move_cursor(self.cursor, direction),
            Action::PlaceAtCursor => self.place(self.cursor.to_index(), now),
            Action::Place(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.place(index, now);
            }
            Action::ResetGame => self.reset_game(),
            Action::ResetScores => {
                let persistence = self.engine.reset_scores();
                self.note_persistence(&persistence);
            }
            Action::CloseModal => self.close_modal(now),
            Action::Quit => {
                info!("User quit");
                return Control::Quit;
            }
            Action::Ignore => {}
        }
        Control::Continue
    }

    /// Fires due effects and drops expired confetti.
    pub fn tick(&mut self, now: Instant) {
        for action in self.schedule.due(now) {
            debug!(?action, "Deferred action due");
            match action {
                Deferred::ShowModal(outcome) => {
                    if self.engine.status().is_terminal() {
                        self.modal = Some(Modal::for_outcome(outcome));
                    }
                }
                Deferred::ResetGame => self.reset_game(),
            }
        }
        self.confetti.prune(now);
    }

    fn place(&mut self, index: usize, now: Instant) {
        let placement = match self.engine.place_mark(index) {
            Ok(placement) => placement,
            Err(e) => {
                debug!(error = %e, "Ignoring placement");
                return;
            }
        };

        self.note_persistence(placement.persistence());

        match *placement.status() {
            GameStatus::InProgress => {}
            GameStatus::Won(player) => {
                if *self.config.confetti() {
                    self.confetti.burst(
                        now,
                        *self.config.confetti_count(),
                        self.config.confetti_stagger(),
                        self.config.confetti_lifetime(),
                        &mut self.rng,
                    );
                }
                self.schedule.push(
                    now + self.config.win_modal_delay(),
                    Deferred::ShowModal(Outcome::Winner(player)),
                );
            }
            GameStatus::Draw => {
                self.schedule.push(
                    now + self.config.draw_modal_delay(),
                    Deferred::ShowModal(Outcome::Draw),
                );
            }
        }
    }

    fn close_modal(&mut self, now: Instant) {
        if self.modal.take().is_some() {
            self.schedule
                .push(now + self.config.close_reset_delay(), Deferred::ResetGame);
        }
    }

    fn reset_game(&mut self) {
        self.engine.reset_game();
        self.modal = None;
        self.schedule.clear();
        self.confetti.clear();
        self.status_message = None;
    }

    fn note_persistence(&mut self, persistence: &Persistence) {
        match persistence {
            Persistence::Failed(e) => {
                warn!(error = %e, "Scores not saved");
                self.status_message = Some(format!("Could not save scores: {}", e.message));
            }
            Persistence::Saved => self.status_message = None,
            Persistence::NotNeeded => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tateti_engine::{MemoryStore, Player, ScoreTally};

    fn app() -> App<MemoryStore> {
        App::with_rng(
            GameEngine::new(MemoryStore::new()),
            AppConfig::default(),
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    fn press_digits(app: &mut App<MemoryStore>, digits: &str, now: Instant) {
        for c in digits.chars() {
            app.handle_key(KeyCode::Char(c), now);
        }
    }

    #[test]
    fn test_win_shows_modal_after_delay() {
        let mut app = app();
        let start = Instant::now();
        press_digits(&mut app, "12437", start);

        assert_eq!(app.engine().status(), GameStatus::Won(Player::X));
        assert_eq!(app.confetti().particles().len(), 50);
        app.tick(start + Duration::from_millis(599));
        assert!(app.modal().is_none());

        app.tick(start + Duration::from_millis(600));
        assert_eq!(
            app.modal(),
            Some(&Modal::for_outcome(Outcome::Winner(Player::X)))
        );
    }

    #[test]
    fn test_closing_modal_resets_after_delay() {
        let mut app = app();
        let start = Instant::now();
        press_digits(&mut app, "12437", start);
        app.tick(start + Duration::from_millis(600));

        let closed = start + Duration::from_secs(1);
        assert_eq!(app.handle_key(KeyCode::Esc, closed), Control::Continue);
        assert!(app.modal().is_none());
        assert!(!app.engine().is_active());

        app.tick(closed + Duration::from_millis(200));
        assert!(app.engine().is_active());
        assert_eq!(app.engine().moves_played(), 0);
        assert!(app.confetti().is_empty());
        assert_eq!(app.engine().scores(), &ScoreTally::new(1, 0, 0));
    }

    #[test]
    fn test_draw_modal_without_confetti() {
        let mut app = app();
        let start = Instant::now();
        press_digits(&mut app, "123546879", start);

        assert_eq!(app.engine().status(), GameStatus::Draw);
        assert!(app.confetti().is_empty());
        app.tick(start + Duration::from_millis(300));
        assert_eq!(app.modal(), Some(&Modal::for_outcome(Outcome::Draw)));
    }

    #[test]
    fn test_board_keys_ignored_while_modal_open() {
        let mut app = app();
        let start = Instant::now();
        press_digits(&mut app, "12437", start);
        app.tick(start + Duration::from_millis(600));

        app.handle_key(KeyCode::Char('r'), start);
        assert!(app.modal().is_some());
        assert!(!app.engine().is_active());
    }

    #[test]
    fn test_manual_reset_cancels_pending_modal() {
        let mut app = app();
        let start = Instant::now();
        press_digits(&mut app, "12437", start);
        app.handle_key(KeyCode::Char('r'), start);

        assert!(app.schedule().is_empty());
        app.tick(start + Duration::from_secs(1));
        assert!(app.modal().is_none());
        assert!(app.engine().is_active());
    }

    #[test]
    fn test_cursor_placement_and_occupied_cell_ignored() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(KeyCode::Enter, now);
        assert_eq!(app.engine().moves_played(), 1);

        app.handle_key(KeyCode::Char(' '), now);
        assert_eq!(app.engine().moves_played(), 1);
        assert_eq!(app.engine().current(), Player::O);

        app.handle_key(KeyCode::Up, now);
        app.handle_key(KeyCode::Enter, now);
        assert_eq!(app.cursor(), Position::TopCenter);
        assert_eq!(app.engine().moves_played(), 2);
    }

    #[test]
    fn test_failed_save_sets_status_message() {
        let mut store = MemoryStore::new();
        store.set_fail_saves(true);
        let mut app = App::with_rng(
            GameEngine::new(store),
            AppConfig::default(),
            ChaCha8Rng::seed_from_u64(7),
        );
        press_digits(&mut app, "12437", Instant::now());

        assert!(app.status_message().is_some_and(|m| m.starts_with("Could not save scores")));
        assert_eq!(app.engine().scores().x(), 1);
    }

    #[test]
    fn test_reset_scores_key() {
        let mut app = App::with_rng(
            GameEngine::new(MemoryStore::with_record(ScoreTally::new(3, 2, 1))),
            AppConfig::default(),
            ChaCha8Rng::seed_from_u64(7),
        );
        app.handle_key(KeyCode::Char('s'), Instant::now());
        assert_eq!(app.engine().scores(), &ScoreTally::default());
        assert_eq!(app.engine().store().record(), Some(ScoreTally::default()));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('q'), Instant::now()), Control::Quit);
    }
}
