//! Connect Four play session.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Coord, GameResult, Line, MoveError, Scoreboard, Side, Status};
use crate::persist::{keys, Persistent};
use crate::search::{Minimax, SearchConfig, SearchStats};

use super::board::{Board, Weighted, COLS};
use super::eval::EvalWeights;

/// The side the computer plays in vs-AI mode.
pub const AI_SIDE: Side = Side::Second;

/// Connect Four session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourConfig {
    pub vs_ai: bool,
    pub search: SearchConfig,
    pub weights: EvalWeights,
}

impl Default for ConnectFourConfig {
    fn default() -> Self {
        Self {
            vs_ai: true,
            search: SearchConfig::depth_limited(4),
            weights: EvalWeights::default(),
        }
    }
}

impl ConnectFourConfig {
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

    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// A sequence of Connect Four games with a running scoreboard.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    board: Board,
    to_move: Side,
    result: Option<GameResult>,
    winning_line: Option<Line>,
    vs_ai: bool,
    scores: Scoreboard,
    search: Minimax,
    weights: EvalWeights,
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new(ConnectFourConfig::default())
    }
}

impl ConnectFour {
    pub fn new(config: ConnectFourConfig) -> Self {
        Self {
            board: Board::new(),
            to_move: Side::First,
            result: None,
            winning_line: None,
            vs_ai: config.vs_ai,
            scores: Scoreboard::default(),
            search: Minimax::new(config.search),
            weights: config.weights,
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

    #[must_use]
    pub fn search_stats(&self) -> &SearchStats {
        self.search.stats()
    }

    /// Drop a piece into `col` for the side to move.
    ///
    /// In vs-AI mode the computer replies at once; its column is returned.
    pub fn play(&mut self, col: usize) -> Result<Option<usize>, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        if col >= COLS {
            return Err(MoveError::NoSuchColumn(col));
        }
        if self.board.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        self.apply(col);

        if self.vs_ai && self.result.is_none() && self.to_move == AI_SIDE {
            let reply = self.choose(AI_SIDE);
            if let Some(reply) = reply {
                self.apply(reply);
            }
            return Ok(reply);
        }
        Ok(None)
    }

    /// Best column for the side to move, without playing it.
    pub fn hint(&mut self) -> Option<usize> {
        if self.result.is_some() {
            return None;
        }
        self.choose(self.to_move)
    }

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

    fn choose(&mut self, side: Side) -> Option<usize> {
        let position = Weighted {
            board: self.board.clone(),
            weights: &self.weights,
        };
        self.search.best_move(&position, side)
    }

    fn apply(&mut self, col: usize) {
        let side = self.to_move;
        let at = self.board.drop_piece(col, side);

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
        info!(?result, vs_ai = self.vs_ai, "connect four game over");
    }
}

impl Persistent for ConnectFour {
    const KEY: &'static str = keys::CONNECT_FOUR_SCORES;
    type Record = Scoreboard;

    fn record(&self) -> Scoreboard {
        self.scores.clone()
    }

    fn restore(&mut self, record: Scoreboard) {
        self.scores = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_seat() -> ConnectFour {
        ConnectFour::new(ConnectFourConfig::default().with_vs_ai(false))
    }

    #[test]
    fn test_rejects_bad_columns() {
        let mut game = hot_seat();
        assert_eq!(game.play(7), Err(MoveError::NoSuchColumn(7)));

        for _ in 0..6 {
            game.play(0).unwrap();
        }
        assert_eq!(game.play(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(game.to_move(), Side::First);
    }

    #[test]
    fn test_horizontal_win() {
        let mut game = hot_seat();
        for col in [0, 0, 1, 1, 2, 2] {
            game.play(col).unwrap();
        }
        game.play(3).unwrap();

        assert_eq!(game.result(), Some(GameResult::Winner(Side::First)));
        assert_eq!(game.status(), Status::Won);
        let line = game.winning_line().unwrap();
        assert_eq!(line.len(), 4);
        assert!(line.contains(&Coord::new(5, 3)));
        assert_eq!(game.scores().first, 1);
        assert_eq!(game.play(4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_ai_blocks_open_three() {
        let mut game = hot_seat();
        for col in [0, 6, 1, 6, 2] {
            game.play(col).unwrap();
        }
        // X threatens the bottom row at column 3.
        assert_eq!(game.hint(), Some(3));
    }

    #[test]
    fn test_ai_replies_in_vs_ai_mode() {
        let mut game = ConnectFour::default();
        let reply = game.play(3).unwrap();

        assert!(reply.is_some());
        assert_eq!(game.board().pieces(), 2);
        assert_eq!(game.to_move(), Side::First);
        assert!(game.search_stats().nodes > 0);
    }

    #[test]
    fn test_ai_takes_winning_column() {
        let mut game = ConnectFour::default();
        game.set_vs_ai(false);
        for col in [0, 6, 0, 6, 1, 6, 1] {
            game.play(col).unwrap();
        }
        // O has three stacked in column 6 and is to move.
        assert_eq!(game.to_move(), Side::Second);
        assert_eq!(game.hint(), Some(6));
    }
}
