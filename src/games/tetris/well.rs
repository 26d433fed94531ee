//! The playfield: collision, locking and line clears.
//!
//! Rows are kept in a persistent `im::Vector` so clearing a line is a
//! remove plus a push at the front, and snapshots of the well are O(1).

use std::time::Duration;

use im::Vector;

use super::piece::{filled_cells, Shape, Tetromino};

pub const WIDTH: usize = 10;
pub const HEIGHT: usize = 20;

/// Points for clearing 0 to 4 rows at once, before the level multiplier.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

pub type Row = Vec<Option<Tetromino>>;

/// The well of locked cells. Row 0 is the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Well {
    rows: Vector<Row>,
    width: usize,
}

impl Default for Well {
    fn default() -> Self {
        Self::new(HEIGHT, WIDTH)
    }
}

impl Well {
    pub fn new(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "Well dimensions must be non-zero");
        Self {
            rows: (0..height).map(|_| vec![None; width]).collect(),
            width,
        }
    }

    /// Parse rows, top first, of tetromino letters and `.`.
    ///
    /// Panics on ragged rows or unknown letters. Meant for tests.
    pub fn parse(text: &str) -> Self {
        let rows: Vector<Row> = text
            .split_whitespace()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '.' => None,
                        other => match Tetromino::from_letter(other) {
                            Some(kind) => Some(kind),
                            None => panic!("unexpected well character {other:?}"),
                        },
                    })
                    .collect()
            })
            .collect();

        let width = rows.front().map_or(0, Vec::len);
        assert!(width > 0, "Well needs at least one column");
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "Well row {r} has the wrong length");
        }
        Self { rows, width }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, r: usize) -> &[Option<Tetromino>] {
        &self.rows[r]
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Tetromino> {
        self.rows.get(row).and_then(|r| r.get(col).copied().flatten())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Whether `shape` fits with its top-left corner at column `x`, row `y`.
    ///
    /// Every filled cell must be within the side walls and above the floor.
    /// Cells above the top (`row < 0`) are allowed and skip the occupancy
    /// check.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &Shape, x: i32, y: i32) -> bool {
        filled_cells(shape).all(|cell| {
            let bx = x + cell.col as i32;
            let by = y + cell.row as i32;
            if bx < 0 || bx >= self.width as i32 || by >= self.height() as i32 {
                return false;
            }
            by < 0 || self.rows[by as usize][bx as usize].is_none()
        })
    }

    /// Write `shape` into the well and clear full rows.
    ///
    /// Cells above the top are dropped. Returns the number of rows cleared.
    pub fn lock_piece(&mut self, shape: &Shape, x: i32, y: i32, kind: Tetromino) -> usize {
        debug_assert!(self.is_valid_placement(shape, x, y));

        for cell in filled_cells(shape) {
            let by = y + cell.row as i32;
            let bx = x + cell.col as i32;
            if by < 0 || bx < 0 {
                continue;
            }
            if let Some(slot) = self
                .rows
                .get_mut(by as usize)
                .and_then(|row| row.get_mut(bx as usize))
            {
                *slot = Some(kind);
            }
        }

        self.clear_full_rows()
    }

    /// Remove every full row, bottom to top, dropping the rows above.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height();

        while y > 0 {
            if self.rows[y - 1].iter().all(Option::is_some) {
                self.rows.remove(y - 1);
                self.rows.push_front(vec![None; self.width]);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }
}

impl std::fmt::Display for Well {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.map_or('.', Tetromino::letter))?;
            }
        }
        Ok(())
    }
}

/// Points for clearing `cleared` rows at `level`.
#[must_use]
pub fn line_clear_score(cleared: usize, level: u32) -> u32 {
    LINE_SCORES[cleared.min(LINE_SCORES.len() - 1)] * level
}

/// Level reached after clearing `lines` rows.
#[must_use]
pub const fn level_for(lines: u32) -> u32 {
    lines / 10 + 1
}

/// Gravity interval at `level`: 1000 ms at level 1, 100 ms faster per
/// level, never below 100 ms.
#[must_use]
pub fn drop_interval(level: u32) -> Duration {
    let ms = 1000u64.saturating_sub(u64::from(level.saturating_sub(1)) * 100);
    Duration::from_millis(ms.max(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tetris::piece::shape;

    #[test]
    fn test_placement_bounds() {
        let well = Well::new(4, 4);
        let i = shape(Tetromino::I, 0);

        assert!(well.is_valid_placement(&i, 0, 0));
        assert!(!well.is_valid_placement(&i, 1, 0));
        assert!(!well.is_valid_placement(&i, -1, 0));
        assert!(!well.is_valid_placement(&i, 0, 4));
        assert!(well.is_valid_placement(&i, 0, -3));
    }

    #[test]
    fn test_placement_collision() {
        let well = Well::parse("....\n....\n.I..\n....");
        let o = shape(Tetromino::O, 0);
        assert!(!well.is_valid_placement(&o, 0, 1));
        assert!(well.is_valid_placement(&o, 2, 1));
        assert!(!well.is_valid_placement(&o, 1, 2));
        assert!(well.is_valid_placement(&o, 2, 2));
    }

    #[test]
    fn test_lock_discards_cells_above_top() {
        let mut well = Well::new(4, 4);
        let vertical = shape(Tetromino::I, 1);

        assert_eq!(well.lock_piece(&vertical, 0, -2, Tetromino::I), 0);
        assert_eq!(well.filled(), 2);
        assert_eq!(well.get(1, 0), Some(Tetromino::I));
    }

    #[test]
    fn test_single_clear_shifts_rows_down() {
        let mut well = Well::parse("....\n.T..\nOOO.\nJ.J.");
        let vertical = shape(Tetromino::I, 1);

        // A vertical I fills column 3; only row 2 becomes full.
        let cleared = well.lock_piece(&vertical, 3, 0, Tetromino::I);
        assert_eq!(cleared, 1);
        assert_eq!(well.to_string(), "....\n...I\n.T.I\nJ.JI");
    }

    #[test]
    fn test_double_clear_non_adjacent() {
        let mut well = Well::parse("....\nSSS.\n.Z..\nLLL.");
        let vertical = shape(Tetromino::I, 1);

        let cleared = well.lock_piece(&vertical, 3, 0, Tetromino::I);
        assert_eq!(cleared, 2);
        assert_eq!(well.to_string(), "....\n....\n...I\n.Z.I");
    }

    #[test]
    fn test_scoring_and_levels() {
        assert_eq!(line_clear_score(0, 3), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(4, 2), 1600);
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(9), 1);
        assert_eq!(level_for(10), 2);

        assert_eq!(drop_interval(1), Duration::from_millis(1000));
        assert_eq!(drop_interval(5), Duration::from_millis(600));
        assert_eq!(drop_interval(10), Duration::from_millis(100));
        assert_eq!(drop_interval(25), Duration::from_millis(100));
    }
}
