//! Keyboard mapping for the game screen.

use crossterm::event::KeyCode;
use tateti_engine::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor.
    Cursor(KeyCode),
    /// Place a mark at the cursor.
    PlaceAtCursor,
    /// Place a mark at a board index.
    Place(usize),
    /// Start a new game.
    ResetGame,
    /// Zero the scores.
    ResetScores,
    /// Dismiss the result modal.
    CloseModal,
    /// Leave the app.
    Quit,
    /// Nothing to do.
    Ignore,
}

/// Maps a key to an action. While the modal is open only closing and
/// quitting are available.
pub fn action_for(key: KeyCode, modal_open: bool) -> Action {
    if modal_open {
        return match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Action::CloseModal,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::Ignore,
        };
    }

    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Action::Cursor(key),
        KeyCode::Enter | KeyCode::Char(' ') => Action::PlaceAtCursor,
        KeyCode::Char(c @ '1'..='9') => Action::Place(c as usize - '1' as usize),
        KeyCode::Char('r') => Action::ResetGame,
        KeyCode::Char('s') => Action::ResetScores,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Ignore,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
