//! Sliding and merging tiles.
//!
//! Every direction is reduced to "left": the board is rotated clockwise
//! until the requested direction points left, each row is collapsed, and
//! the board is rotated back.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Coord, Grid, RandomSource};

/// A 2048 board. `0` is an empty cell, anything else a power of two.
pub type Board = Grid<u32>;

/// Slide direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Clockwise quarter-turns that make this direction point left.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

/// One row after collapsing towards index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowCollapse {
    pub row: Vec<u32>,
    /// Sum of the merged tile values.
    pub score_delta: u32,
    /// Largest tile produced by a merge (0 if nothing merged).
    pub max_merge: u32,
}

/// Collapse a row towards index 0.
///
/// Each tile merges at most once per collapse: `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`, never `[8, 0, 0, 0]`.
#[must_use]
pub fn collapse_row(row: &[u32]) -> RowCollapse {
    let tiles: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::with_capacity(row.len());
    let mut score_delta = 0;
    let mut max_merge = 0;

    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out.push(merged);
            score_delta += merged;
            max_merge = max_merge.max(merged);
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }
    out.resize(row.len(), 0);

    RowCollapse {
        row: out,
        score_delta,
        max_merge,
    }
}

/// Result of sliding a whole board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome {
    pub board: Board,
    pub score_delta: u32,
    /// Whether any tile changed position or value.
    pub moved: bool,
    pub max_merge: u32,
}

fn rotate(board: &Board, turns: usize) -> Board {
    (0..turns % 4).fold(board.clone(), |b, _| b.rotated_clockwise())
}

/// Slide every tile of `board` towards `direction`.
#[must_use]
pub fn slide(board: &Board, direction: Direction) -> SlideOutcome {
    let turns = direction.quarter_turns();
    let mut work = rotate(board, turns);
    let mut score_delta = 0;
    let mut max_merge = 0;

    for r in 0..work.rows() {
        let collapsed = collapse_row(work.row(r));
        work.row_mut(r).copy_from_slice(&collapsed.row);
        score_delta += collapsed.score_delta;
        max_merge = max_merge.max(collapsed.max_merge);
    }

    let after = rotate(&work, 4 - turns);
    let moved = after != *board;

    SlideOutcome {
        board: after,
        score_delta,
        moved,
        max_merge,
    }
}

/// A tile placed on an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub at: Coord,
    pub value: u32,
}

/// Empty cells in row-major order.
#[must_use]
pub fn empty_cells(board: &Board) -> Vec<Coord> {
    board
        .iter()
        .filter(|(_, v)| **v == 0)
        .map(|(at, _)| at)
        .collect()
}

/// Place a 2 (or, with `four_probability`, a 4) on a uniformly chosen
/// empty cell. `None` if the board is full.
pub fn spawn_random_tile<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    four_probability: f64,
) -> Option<Spawn> {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return None;
    }

    let at = empty[rng.next_index(empty.len())];
    let value = if rng.chance(four_probability) { 4 } else { 2 };
    board[at] = value;

    trace!(%at, value, "tile spawned");
    Some(Spawn { at, value })
}

/// No empty cell and no two equal orthogonal neighbours.
#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    for (at, &value) in board.iter() {
        if value == 0 {
            return false;
        }
        let right = board.offset(at, 0, 1).map(|n| board[n]);
        let below = board.offset(at, 1, 0).map(|n| board[n]);
        if right == Some(value) || below == Some(value) {
            return false;
        }
    }
    true
}

/// Largest tile on the board.
#[must_use]
pub fn max_tile(board: &Board) -> u32 {
    board.values().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;

    fn board(rows: [[u32; 4]; 4]) -> Board {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_collapse_row_cases() {
        let c = collapse_row(&[2, 2, 0, 0]);
        assert_eq!(c.row, vec![4, 0, 0, 0]);
        assert_eq!(c.score_delta, 4);

        assert_eq!(collapse_row(&[2, 2, 2, 2]).row, vec![4, 4, 0, 0]);
        assert_eq!(collapse_row(&[2, 2, 2, 0]).row, vec![4, 2, 0, 0]);
        assert_eq!(collapse_row(&[4, 0, 4, 8]).row, vec![8, 8, 0, 0]);
        assert_eq!(collapse_row(&[0, 0, 0, 2]).row, vec![2, 0, 0, 0]);

        let none = collapse_row(&[2, 4, 8, 16]);
        assert_eq!(none.row, vec![2, 4, 8, 16]);
        assert_eq!(none.score_delta, 0);
        assert_eq!(none.max_merge, 0);
    }

    #[test]
    fn test_collapse_row_no_chain() {
        let c = collapse_row(&[4, 4, 8, 0]);
        assert_eq!(c.row, vec![8, 8, 0, 0]);
        assert_eq!(c.score_delta, 8);
        assert_eq!(c.max_merge, 8);
    }

    #[test]
    fn test_slide_each_direction() {
        let start = board([
            [2, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 0],
        ]);

        let left = slide(&start, Direction::Left);
        assert_eq!(left.board.row(0), &[4, 0, 0, 0]);
        assert_eq!(left.board.row(3), &[2, 0, 0, 0]);
        assert_eq!(left.score_delta, 4);

        let right = slide(&start, Direction::Right);
        assert_eq!(right.board.row(0), &[0, 0, 0, 4]);
        assert_eq!(right.board.row(3), &[0, 0, 0, 2]);

        let up = slide(&start, Direction::Up);
        assert_eq!(up.board.row(0), &[4, 0, 0, 2]);
        assert_eq!(up.board.row(3), &[0, 0, 0, 0]);

        let down = slide(&start, Direction::Down);
        assert_eq!(down.board.row(3), &[4, 0, 0, 2]);
        assert_eq!(down.board.row(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_slide_not_moved() {
        let start = board([
            [2, 4, 0, 0],
            [8, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let out = slide(&start, Direction::Left);
        assert!(!out.moved);
        assert_eq!(out.board, start);
        assert!(slide(&start, Direction::Right).moved);
    }

    #[test]
    fn test_spawn_uses_rng() {
        let mut b = Board::filled(4, 4, 0);
        b[Coord::new(0, 0)] = 2;
        let mut rng = SequenceSource::new([0]).with_rolls([0.05]);

        let spawn = spawn_random_tile(&mut b, &mut rng, 0.1).unwrap();
        assert_eq!(spawn, Spawn { at: Coord::new(0, 1), value: 4 });
        assert_eq!(b[Coord::new(0, 1)], 4);
    }

    #[test]
    fn test_spawn_full_board() {
        let mut b = Board::filled(2, 2, 2);
        let mut rng = SequenceSource::new([0]);
        assert_eq!(spawn_random_tile(&mut b, &mut rng, 0.1), None);
    }

    #[test]
    fn test_game_over_detection() {
        let stuck = board([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(is_game_over(&stuck));

        let mut mergeable = stuck.clone();
        mergeable[Coord::new(3, 3)] = 4;
        assert!(!is_game_over(&mergeable));

        let mut open = stuck;
        open[Coord::new(1, 1)] = 0;
        assert!(!is_game_over(&open));
    }
}
