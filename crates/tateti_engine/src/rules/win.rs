//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the 8 fixed winning patterns.
///
/// Variant order is the evaluation order: rows top to bottom, columns left
/// to right, then the main and anti diagonals. When one placement completes
/// several lines, the earliest one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum WinLine {
    /// Top row (0, 1, 2).
    Row0,
    /// Middle row (3, 4, 5).
    Row1,
    /// Bottom row (6, 7, 8).
    Row2,
    /// Left column (0, 3, 6).
    Col0,
    /// Middle column (1, 4, 7).
    Col1,
    /// Right column (2, 5, 8).
    Col2,
    /// Top-left to bottom-right (0, 4, 8).
    DiagMain,
    /// Top-right to bottom-left (2, 4, 6).
    DiagAnti,
}

impl WinLine {
    /// All lines in evaluation order.
    pub const ALL: [WinLine; 8] = [
        WinLine::Row0,
        WinLine::Row1,
        WinLine::Row2,
        WinLine::Col0,
        WinLine::Col1,
        WinLine::Col2,
        WinLine::DiagMain,
        WinLine::DiagAnti,
    ];

    /// Board indices covered by this line.
    pub fn indices(self) -> [usize; 3] {
        match self {
            WinLine::Row0 => [0, 1, 2],
            WinLine::Row1 => [3, 4, 5],
            WinLine::Row2 => [6, 7, 8],
            WinLine::Col0 => [0, 3, 6],
            WinLine::Col1 => [1, 4, 7],
            WinLine::Col2 => [2, 5, 8],
            WinLine::DiagMain => [0, 4, 8],
            WinLine::DiagAnti => [2, 4, 6],
        }
    }

    /// Positions covered by this line.
    pub fn positions(self) -> [Position; 3] {
        self.indices().map(|i| Position::ALL[i])
    }

    /// Whether the line passes through `pos`.
    pub fn contains(self, pos: Position) -> bool {
        self.indices().contains(&pos.to_index())
    }
}

/// Returns the first line fully held by `player`, if any.
///
/// Only `player` is checked: a mark can complete a line solely for the
/// player who placed it.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, player: Player) -> Option<WinLine> {
    let mark = Square::Occupied(player);
    WinLine::ALL
        .into_iter()
        .find(|line| line.positions().iter().all(|&pos| board.get(pos) == mark))
}
