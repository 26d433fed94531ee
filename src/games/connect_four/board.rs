//! The 6×7 Connect Four board.

use crate::core::{line_through, Coord, Grid, Line, Side};
use crate::search::{Adversarial, MoveList};

use super::eval::{evaluate, EvalWeights};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// A Connect Four position. Row 0 is the top; pieces fall to the highest
/// free row index of their column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Grid<Option<Side>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Grid::filled(ROWS, COLS, None),
        }
    }

    /// Parse six whitespace-separated rows, top first, of `X` (first
    /// player), `O` (second player) and `.`.
    ///
    /// Floating pieces are not rejected. Meant for tests.
    pub fn parse(text: &str) -> Self {
        let rows: Vec<Vec<Option<Side>>> = text
            .split_whitespace()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        'X' | 'x' => Some(Side::First),
                        'O' | 'o' => Some(Side::Second),
                        '.' => None,
                        other => panic!("unexpected board character {other:?}"),
                    })
                    .collect()
            })
            .collect();

        let cells = Grid::from_rows(rows);
        assert_eq!((cells.rows(), cells.cols()), (ROWS, COLS), "board must be {ROWS}x{COLS}");
        Self { cells }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Option<Side>> {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Option<Side> {
        self.cells.get(at).copied().flatten()
    }

    /// Row a piece dropped into `col` would land on.
    #[must_use]
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[Coord::new(row, col)].is_none())
    }

    #[must_use]
    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Columns that still take a piece, left to right.
    #[must_use]
    pub fn open_columns(&self) -> MoveList<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece into `col`. Panics if the column is full.
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Coord {
        let Some(row) = self.landing_row(col) else {
            panic!("column {col} cannot take a piece");
        };
        let at = Coord::new(row, col);
        self.cells[at] = Some(side);
        at
    }

    /// Take back the piece at `at`.
    pub fn lift(&mut self, at: Coord) {
        self.cells[at] = None;
    }

    /// The line of four or more through the piece at `at`, if any.
    #[must_use]
    pub fn line_at(&self, at: Coord) -> Option<Line> {
        self.cells.get(at)?.as_ref()?;
        line_through(&self.cells, at, CONNECT)
    }

    /// Every column is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.row(0).iter().all(Option::is_some)
    }

    #[must_use]
    pub fn pieces(&self) -> usize {
        self.cells.values().filter(|v| v.is_some()).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..ROWS {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in self.cells.row(r) {
                write!(f, "{}", cell.map_or('.', Side::mark))?;
            }
        }
        Ok(())
    }
}

impl Adversarial for Board {
    type Move = usize;

    fn moves(&self) -> MoveList<usize> {
        self.open_columns()
    }

    fn play(&mut self, mv: usize, side: Side) -> Coord {
        self.drop_piece(mv, side)
    }

    fn unplay(&mut self, at: Coord) {
        self.lift(at);
    }

    fn completes_line(&self, at: Coord) -> bool {
        self.line_at(at).is_some()
    }

    fn is_full(&self) -> bool {
        Board::is_full(self)
    }

    fn evaluate(&self, side: Side) -> i32 {
        evaluate(self, side, &EvalWeights::default())
    }
}

/// A board searched with custom evaluation weights.
#[derive(Clone, Debug)]
pub struct Weighted<'w> {
    pub board: Board,
    pub weights: &'w EvalWeights,
}

impl Adversarial for Weighted<'_> {
    type Move = usize;

    fn moves(&self) -> MoveList<usize> {
        self.board.open_columns()
    }

    fn play(&mut self, mv: usize, side: Side) -> Coord {
        self.board.drop_piece(mv, side)
    }

    fn unplay(&mut self, at: Coord) {
        self.board.lift(at);
    }

    fn completes_line(&self, at: Coord) -> bool {
        self.board.line_at(at).is_some()
    }

    fn is_full(&self) -> bool {
        self.board.is_full()
    }

    fn evaluate(&self, side: Side) -> i32 {
        evaluate(&self.board, side, self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pieces_stack_from_the_bottom() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(3, Side::First), Coord::new(5, 3));
        assert_eq!(board.drop_piece(3, Side::Second), Coord::new(4, 3));
        assert_eq!(board.landing_row(3), Some(3));
        assert_eq!(board.landing_row(7), None);
    }

    #[test]
    fn test_full_column() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let side = if i % 2 == 0 { Side::First } else { Side::Second };
            board.drop_piece(0, side);
        }
        assert!(board.is_column_full(0));
        assert_eq!(board.open_columns().as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "cannot take a piece")]
    fn test_drop_into_full_column_panics() {
        let mut board = Board::new();
        for _ in 0..=ROWS {
            board.drop_piece(2, Side::First);
        }
    }

    #[test]
    fn test_vertical_line() {
        let mut board = Board::new();
        let mut last = Coord::new(0, 0);
        for _ in 0..4 {
            last = board.drop_piece(1, Side::Second);
        }
        let line = board.line_at(last).unwrap();
        assert_eq!(line.len(), 4);
        assert!(line.contains(&last));
    }

    #[test]
    fn test_lift_restores_position() {
        let mut board = Board::new();
        board.drop_piece(4, Side::First);
        let before = board.clone();

        let at = board.drop_piece(4, Side::Second);
        board.lift(at);
        assert_eq!(board, before);
    }

    #[test]
    fn test_parse_display_roundtrip() {
        let text = ".......\n.......\n.......\n.......\n...O...\n..XXO..";
        let board = Board::parse(text);
        assert_eq!(board.to_string(), text);
        assert_eq!(board.pieces(), 4);
    }
}
