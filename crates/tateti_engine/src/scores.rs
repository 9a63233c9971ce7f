//! Running win/draw tallies.

use crate::{GameStatus, Player};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Outcome for a terminal status, `None` while the game is in progress.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Outcome::Winner(player)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Win and draw counters, kept across games.
///
/// Serialized as `{"X": _, "O": _, "draw": _}`. Only a JSON object is
/// accepted back; missing fields read as zero and unknown ones are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ScoreTally {
    #[serde(rename = "X")]
    x: u32,
    #[serde(rename = "O")]
    o: u32,
    draw: u32,
}

impl ScoreTally {
    /// Creates a tally with explicit counts.
    pub fn new(x: u32, o: u32, draw: u32) -> Self {
        Self { x, o, draw }
    }

    /// Games won by X.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Games won by O.
    pub fn o(&self) -> u32 {
        self.o
    }

    /// Drawn games.
    pub fn draw(&self) -> u32 {
        self.draw
    }

    /// Wins for one player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Counter for one outcome.
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Winner(player) => self.wins(player),
            Outcome::Draw => self.draw,
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> u32 {
        self.x.saturating_add(self.o).saturating_add(self.draw)
    }

    /// Increments the counter for `outcome`.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Winner(Player::X) => &mut self.x,
            Outcome::Winner(Player::O) => &mut self.o,
            Outcome::Draw => &mut self.draw,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl TryFrom<Map<String, Value>> for ScoreTally {
    type Error = String;

    fn try_from(record: Map<String, Value>) -> Result<Self, Self::Error> {
        let count = |key: &str| match record.get(key) {
            None => Ok(0),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| format!("field `{}` is not a count: {}", key, value)),
        };
        Ok(Self::new(count("X")?, count("O")?, count("draw")?))
    }
}
