//! Sides in two-player games and their win/draw tallies.
//!
//! ## Side
//!
//! `Side::First` moves first (X in Tic-Tac-Toe, player 1 in Connect Four).
//! Against the AI, the human always plays `First`.
//!
//! ## Scoreboard
//!
//! Per-side win counts plus draws, kept across games in one session and
//! persisted between sessions.

use serde::{Deserialize, Serialize};

use super::status::GameResult;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// 0 for `First`, 1 for `Second`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Tic-Tac-Toe mark for this side.
    #[must_use]
    pub const fn mark(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Win and draw counters.
///
/// Records keyed `X`/`O` or `player1`/`player2` load too; missing counters
/// are zero.
///
/// ```
/// use rust_arcade::core::{GameResult, Scoreboard, Side};
///
/// let mut board = Scoreboard::default();
/// board.record(&GameResult::Winner(Side::Second));
/// board.record(&GameResult::Draw);
///
/// assert_eq!(board.wins(Side::Second), 1);
/// assert_eq!(board.draws, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    #[serde(alias = "X", alias = "player1")]
    pub first: u32,
    #[serde(alias = "O", alias = "player2")]
    pub second: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Count one finished game.
    pub fn record(&mut self, result: &GameResult) {
        match result {
            GameResult::Winner(Side::First) => self.first += 1,
            GameResult::Winner(Side::Second) => self.second += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    #[must_use]
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }

    /// Total games counted.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.first + self.second + self.draws
    }
}
