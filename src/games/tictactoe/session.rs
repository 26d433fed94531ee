//! Tic-Tac-Toe play session.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Coord, GameResult, Line, MoveError, Scoreboard, Side, Status};
use crate::persist::{keys, Persistent};
use crate::search::{Minimax, SearchConfig, SearchStats};

use super::board::{Board, CELLS};

/// The side the computer plays in vs-AI mode.
pub const AI_SIDE: Side = Side::Second;

/// Tic-Tac-Toe session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeConfig {
    /// Play against the computer (`O`) instead of a second human.
    pub vs_ai: bool,

    /// AI search parameters.
    pub search: SearchConfig,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            vs_ai: true,
            search: SearchConfig::exhaustive(),
        }
    }
}

impl TicTacToeConfig {
    #[must_use]
    pub fn with_vs_ai(mut self, vs_ai: bool) -> Self {
        self.vs_ai = vs_ai;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// A sequence of Tic-Tac-Toe games with a running scoreboard.
///
/// `X` (`Side::First`) always opens. In vs-AI mode every accepted human
/// move is answered immediately by the computer.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    board: Board,
    to_move: Side,
    result: Option<GameResult>,
    winning_line: Option<Line>,
    vs_ai: bool,
    scores: Scoreboard,
    search: Minimax,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(TicTacToeConfig::default())
    }
}

impl TicTacToe {
    pub fn new(config: TicTacToeConfig) -> Self {
        Self {
            board: Board::new(),
            to_move: Side::First,
            result: None,
            winning_line: None,
            vs_ai: config.vs_ai,
            scores: Scoreboard::default(),
            search: Minimax::new(config.search),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status::from_result(self.result, self.board.pieces() > 0)
    }

    /// Cells of the winning line, for highlighting.
    #[must_use]
    pub fn winning_line(&self) -> Option<&[Coord]> {
        self.winning_line.as_deref()
    }

    #[must_use]
    pub fn is_vs_ai(&self) -> bool {
        self.vs_ai
    }

    #[must_use]
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Statistics of the last AI search.
    #[must_use]
    pub fn search_stats(&self) -> &SearchStats {
        self.search.stats()
    }

    /// Play `cell` for the side to move.
    ///
    /// In vs-AI mode the computer replies at once; its cell is returned.
    pub fn play(&mut self, cell: usize) -> Result<Option<usize>, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        let at = Board::coord(cell);
        if cell >= CELLS {
            return Err(MoveError::OutOfBounds(at));
        }
        if self.board.get(cell).is_some() {
            return Err(MoveError::Occupied(at));
        }

        self.apply(cell);

        if self.vs_ai && self.result.is_none() && self.to_move == AI_SIDE {
            let reply = self.search.best_move(&self.board, AI_SIDE);
            if let Some(reply) = reply {
                self.apply(reply);
            }
            return Ok(reply);
        }
        Ok(None)
    }

    /// Best cell for the side to move, without playing it.
    pub fn hint(&mut self) -> Option<usize> {
        if self.result.is_some() {
            return None;
        }
        self.search.best_move(&self.board, self.to_move)
    }

    /// Switch between vs-AI and two-player mode. Starts a new game.
    pub fn set_vs_ai(&mut self, vs_ai: bool) {
        self.vs_ai = vs_ai;
        self.reset();
    }

    /// Start a new game. Scores are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = Side::First;
        self.result = None;
        self.winning_line = None;
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scoreboard::default();
    }

    fn apply(&mut self, cell: usize) {
        let side = self.to_move;
        let at = self.board.place(cell, side);

        if let Some(line) = self.board.line_at(at) {
            self.winning_line = Some(line);
            self.finish(GameResult::Winner(side));
        } else if self.board.is_full() {
            self.finish(GameResult::Draw);
        } else {
            self.to_move = side.other();
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
        self.scores.record(&result);
        info!(?result, vs_ai = self.vs_ai, "tic-tac-toe game over");
    }
}

impl Persistent for TicTacToe {
    const KEY: &'static str = keys::TICTACTOE_SCORES;
    type Record = Scoreboard;

    fn record(&self) -> Scoreboard {
        self.scores.clone()
    }

    fn restore(&mut self, record: Scoreboard) {
        self.scores = record;
    }
}
