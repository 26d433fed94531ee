//! Heuristic evaluation for depth-limited search.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Side, AXES};

use super::board::{Board, CONNECT};

/// Scores of the positional features, seen from the evaluated side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per own piece in the centre column.
    pub center: i32,
    /// Window holding four own pieces.
    pub four: i32,
    /// Window holding three own pieces and one empty cell.
    pub three: i32,
    /// Window holding two own pieces and two empty cells.
    pub two: i32,
    /// Window holding three opposing pieces and one empty cell.
    pub opponent_three: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            center: 3,
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
        }
    }
}

impl EvalWeights {
    #[must_use]
    pub fn with_center(mut self, center: i32) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn with_opponent_three(mut self, penalty: i32) -> Self {
        self.opponent_three = penalty;
        self
    }
}

/// Score one window of `CONNECT` cells.
#[must_use]
pub fn score_window(window: &[Option<Side>], side: Side, weights: &EvalWeights) -> i32 {
    let own = window.iter().filter(|c| **c == Some(side)).count();
    let theirs = window.iter().filter(|c| **c == Some(side.other())).count();
    let empty = window.len() - own - theirs;

    let mut score = match (own, empty) {
        (4, _) => weights.four,
        (3, 1) => weights.three,
        (2, 2) => weights.two,
        _ => 0,
    };
    if theirs == 3 && empty == 1 {
        score += weights.opponent_three;
    }
    score
}

/// Static value of `board` for `side`: centre control plus every
/// in-bounds window along the four axes.
#[must_use]
pub fn evaluate(board: &Board, side: Side, weights: &EvalWeights) -> i32 {
    let grid = board.grid();
    let center = grid.cols() / 2;

    let mut score = (0..grid.rows())
        .filter(|&row| grid[Coord::new(row, center)] == Some(side))
        .count() as i32
        * weights.center;

    let mut window = [None; CONNECT];
    for origin in grid.coords() {
        'axis: for (dr, dc) in AXES {
            let mut at = origin;
            window[0] = grid[at];
            for slot in window.iter_mut().skip(1) {
                match grid.offset(at, dr, dc) {
                    Some(next) => {
                        *slot = grid[next];
                        at = next;
                    }
                    None => continue 'axis,
                }
            }
            score += score_window(&window, side, weights);
        }
    }

    score
}
