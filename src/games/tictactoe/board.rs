//! The 3×3 board.

use crate::core::{line_through, Coord, Grid, Line, Side};
use crate::search::{Adversarial, MoveList};

/// Side length of the board.
pub const SIZE: usize = 3;

/// Number of cells, and the exclusive upper bound of a cell index.
pub const CELLS: usize = SIZE * SIZE;

/// A Tic-Tac-Toe position. Cells are addressed by index `0..9`, row-major.
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
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: Grid::filled(SIZE, SIZE, None),
        }
    }

    /// Parse three whitespace-separated rows of `X`, `O` and `.`.
    ///
    /// Panics on anything else. Meant for tests and examples.
    pub fn parse(text: &str) -> Self {
        let rows: Vec<Vec<Option<Side>>> = text
            .split_whitespace()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        'X' | 'x' => Some(Side::First),
                        'O' | 'o' => Some(Side::Second),
                        '.' | '_' => None,
                        other => panic!("unexpected board character {other:?}"),
                    })
                    .collect()
            })
            .collect();

        assert_eq!(rows.len(), SIZE, "board needs {SIZE} rows");
        let cells = Grid::from_rows(rows);
        assert_eq!(cells.cols(), SIZE, "board needs {SIZE} columns");
        Self { cells }
    }

    /// Coordinate of a cell index.
    #[must_use]
    pub const fn coord(cell: usize) -> Coord {
        Coord::new(cell / SIZE, cell % SIZE)
    }

    #[must_use]
    pub fn get(&self, cell: usize) -> Option<Side> {
        self.cells.get(Self::coord(cell)).copied().flatten()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Option<Side>> {
        &self.cells
    }

    /// Place `side` on an empty cell.
    pub fn place(&mut self, cell: usize, side: Side) -> Coord {
        let at = Self::coord(cell);
        assert!(self.cells[at].is_none(), "cell {cell} is already occupied");
        self.cells[at] = Some(side);
        at
    }

    /// Empty cells in ascending index order.
    #[must_use]
    pub fn empty_cells(&self) -> MoveList<usize> {
        self.cells
            .values()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of pieces on the board.
    #[must_use]
    pub fn pieces(&self) -> usize {
        self.cells.values().filter(|v| v.is_some()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.values().all(Option::is_some)
    }

    /// The three-in-a-row through the piece at `at`, if any.
    #[must_use]
    pub fn line_at(&self, at: Coord) -> Option<Line> {
        self.cells.get(at)?.as_ref()?;
        line_through(&self.cells, at, SIZE)
    }

    /// Scan the whole board for a winner.
    #[must_use]
    pub fn winner(&self) -> Option<(Side, Line)> {
        self.cells.coords().find_map(|at| {
            let side = self.cells[at]?;
            self.line_at(at).map(|line| (side, line))
        })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..SIZE {
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
        self.empty_cells()
    }

    fn play(&mut self, mv: usize, side: Side) -> Coord {
        self.place(mv, side)
    }

    fn unplay(&mut self, at: Coord) {
        self.cells[at] = None;
    }

    fn completes_line(&self, at: Coord) -> bool {
        self.line_at(at).is_some()
    }

    fn is_full(&self) -> bool {
        Board::is_full(self)
    }
}
