//! Session lifecycle shared by every game.
//!
//! `NotStarted → InProgress → {Won | Lost | Drawn}`. Moves are accepted only
//! while `InProgress` (and, for games that start on the first input, while
//! `NotStarted`). The terminal condition is checked after every move.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Result of a completed two-player game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Board filled with no winner.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
    Drawn,
}

impl Status {
    /// Whether the session reached a terminal state.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Status::Won | Status::Lost | Status::Drawn)
    }

    /// Status of a two-player game as seen by `Side::First`.
    #[must_use]
    pub fn from_result(result: Option<GameResult>, any_moves: bool) -> Self {
        match result {
            Some(GameResult::Winner(Side::First)) => Status::Won,
            Some(GameResult::Winner(Side::Second)) => Status::Lost,
            Some(GameResult::Draw) => Status::Drawn,
            None if any_moves => Status::InProgress,
            None => Status::NotStarted,
        }
    }
}
