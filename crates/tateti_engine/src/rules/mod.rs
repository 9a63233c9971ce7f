//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). They read no engine state,
//! so the engine and tests can evaluate any board directly.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WinLine, winning_line};
