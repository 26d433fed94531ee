//! Fixed-size rectangular boards.
//!
//! Every game board is a `Grid<T>`: row-major storage with dimensions fixed
//! at construction. Ragged or empty input is a programming error and panics.
//!
//! ```
//! use rust_arcade::core::{Coord, Grid};
//!
//! let mut grid: Grid<u32> = Grid::filled(4, 4, 0);
//! grid[Coord::new(1, 2)] = 8;
//!
//! assert_eq!(grid.row(1), &[0, 0, 8, 0]);
//! assert_eq!(grid.neighbors(Coord::new(0, 0)).len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// A cell position: row index from the top, column index from the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four line axes: horizontal, vertical, down-right, down-left.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Coordinates of one straight run of cells.
pub type Line = SmallVec<[Coord; 8]>;

/// Rectangular grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid with values from a factory function.
    pub fn new(rows: usize, cols: usize, factory: impl Fn(Coord) -> T) -> Self {
        assert!(rows > 0 && cols > 0, "Grid dimensions must be non-zero");

        let cells = (0..rows * cols)
            .map(|i| factory(Coord::new(i / cols, i % cols)))
            .collect();

        Self { rows, cols, cells }
    }

    /// Create a grid with every cell set to the same value.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(rows, cols, |_| value.clone())
    }

    /// Build from nested rows. Panics if the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len();
        assert!(height > 0, "Grid needs at least one row");
        let width = rows[0].len();
        assert!(width > 0, "Grid needs at least one column");

        let mut cells = Vec::with_capacity(height * width);
        for (r, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), width, "Grid row {r} has the wrong length");
            cells.extend(row);
        }

        Self {
            rows: height,
            cols: width,
            cells,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have non-zero dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Option<&T> {
        self.contains(at).then(|| &self.cells[at.row * self.cols + at.col])
    }

    pub fn get_mut(&mut self, at: Coord) -> Option<&mut T> {
        if self.contains(at) {
            Some(&mut self.cells[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Coordinate for a row-major index.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    /// Row-major index of a coordinate.
    #[must_use]
    pub fn index_of(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    /// Step from `at` by `(dr, dc)`, or `None` if that leaves the grid.
    #[must_use]
    pub fn offset(&self, at: Coord, dr: isize, dc: isize) -> Option<Coord> {
        let row = at.row.checked_add_signed(dr)?;
        let col = at.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.contains(next).then_some(next)
    }

    /// The up-to-8 cells surrounding `at`.
    #[must_use]
    pub fn neighbors(&self, at: Coord) -> SmallVec<[Coord; 8]> {
        let mut out = SmallVec::new();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = self.offset(at, dr, dc) {
                    out.push(n);
                }
            }
        }
        out
    }

    #[must_use]
    pub fn row(&self, r: usize) -> &[T] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        &mut self.cells[r * self.cols..(r + 1) * self.cols]
    }

    /// Iterate all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.cells.len()).map(move |i| Coord::new(i / cols, i % cols))
    }

    /// Iterate `(Coord, &T)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Coord::new(i / cols, i % cols), v))
    }

    /// Iterate cell values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Copy out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Same grid rotated 90 degrees clockwise.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self
    where
        T: Clone,
    {
        let (rows, cols) = (self.rows, self.cols);
        Grid::new(cols, rows, |at| self[Coord::new(rows - 1 - at.col, at.row)].clone())
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, at: Coord) -> &Self::Output {
        assert!(self.contains(at), "{at} is outside a {}x{} grid", self.rows, self.cols);
        &self.cells[at.row * self.cols + at.col]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, at: Coord) -> &mut Self::Output {
        assert!(self.contains(at), "{at} is outside a {}x{} grid", self.rows, self.cols);
        &mut self.cells[at.row * self.cols + at.col]
    }
}

/// Find a run of at least `len` cells equal to the value at `origin`.
///
/// Scans outward from `origin` in both directions along each axis and
/// returns the first run that is long enough, origin included. Intended to
/// be called on a just-placed cell; an origin holding the "empty" value is
/// the caller's mistake and will happily match other empty cells.
#[must_use]
pub fn line_through<T: PartialEq>(grid: &Grid<T>, origin: Coord, len: usize) -> Option<Line> {
    let owner = grid.get(origin)?;

    for (dr, dc) in AXES {
        let mut line: Line = SmallVec::new();
        line.push(origin);

        for sign in [1, -1] {
            let mut at = origin;
            while let Some(next) = grid.offset(at, dr * sign, dc * sign) {
                if grid[next] != *owner {
                    break;
                }
                line.push(next);
                at = next;
            }
        }

        if line.len() >= len {
            return Some(line);
        }
    }

    None
}
