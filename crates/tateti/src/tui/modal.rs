//! End-of-game modal contents.

use derive_new::new;
use tateti_engine::Outcome;

/// Text of the result modal.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Modal {
    /// Leading icon.
    pub icon: &'static str,
    /// Headline.
    #[new(into)]
    pub title: String,
    /// Body text.
    #[new(into)]
    pub message: String,
}

impl Modal {
    /// Modal announcing `outcome`.
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(player) => {
                Self::new("🎉", "Victory!", format!("Player {} wins!", player))
            }
            Outcome::Draw => Self::new("🤝", "Draw!", "The game ended in a draw"),
        }
    }
}
