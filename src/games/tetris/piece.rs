//! Tetrominoes, rotation and piece selection.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Grid, RandomSource};

/// A piece shape: `true` cells are filled.
pub type Shape = Grid<bool>;

/// The seven tetrominoes. The kind doubles as the colour tag of locked cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    /// Spawn orientation (rotation 0).
    #[must_use]
    pub fn spawn_shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            Tetromino::I => &[&[1, 1, 1, 1]],
            Tetromino::O => &[&[1, 1], &[1, 1]],
            Tetromino::T => &[&[0, 1, 0], &[1, 1, 1]],
            Tetromino::S => &[&[0, 1, 1], &[1, 1, 0]],
            Tetromino::Z => &[&[1, 1, 0], &[0, 1, 1]],
            Tetromino::J => &[&[1, 0, 0], &[1, 1, 1]],
            Tetromino::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| v == 1).collect())
                .collect(),
        )
    }

    /// Display colour as a CSS hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Tetromino::I => "#00f5ff",
            Tetromino::O => "#ffd700",
            Tetromino::T => "#a855f7",
            Tetromino::S => "#22c55e",
            Tetromino::Z => "#ef4444",
            Tetromino::J => "#3b82f6",
            Tetromino::L => "#f97316",
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Tetromino::I => 'I',
            Tetromino::O => 'O',
            Tetromino::T => 'T',
            Tetromino::S => 'S',
            Tetromino::Z => 'Z',
            Tetromino::J => 'J',
            Tetromino::L => 'L',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.letter() == letter)
    }
}

/// Rotate a shape 90° clockwise.
#[must_use]
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated_clockwise()
}

/// The shape of `kind` after `rotation` clockwise quarter-turns.
#[must_use]
pub fn shape(kind: Tetromino, rotation: u8) -> Shape {
    (0..rotation % 4).fold(kind.spawn_shape(), |s, _| rotate(&s))
}

/// `(row, col)` offsets of the filled cells of a shape.
pub fn filled_cells(shape: &Shape) -> impl Iterator<Item = Coord> + '_ {
    shape.iter().filter(|(_, filled)| **filled).map(|(at, _)| at)
}

/// How the next piece is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Randomizer {
    /// Each piece independently and uniformly.
    #[default]
    Uniform,
    /// Shuffled bags of all seven; no piece repeats more than twice in a row.
    Bag,
}

/// Source of upcoming pieces.
#[derive(Clone, Debug, Default)]
pub struct PieceQueue {
    mode: Randomizer,
    bag: Vec<Tetromino>,
}

impl PieceQueue {
    pub fn new(mode: Randomizer) -> Self {
        Self {
            mode,
            bag: Vec::new(),
        }
    }

    pub fn next<R: RandomSource>(&mut self, rng: &mut R) -> Tetromino {
        match self.mode {
            Randomizer::Uniform => Tetromino::ALL[rng.next_index(Tetromino::ALL.len())],
            Randomizer::Bag => match self.bag.pop() {
                Some(kind) => kind,
                None => {
                    self.bag.extend(Tetromino::ALL);
                    rng.shuffle(&mut self.bag);
                    let last = self.bag.len() - 1;
                    self.bag.swap_remove(last)
                }
            },
        }
    }

    pub fn clear(&mut self) {
        self.bag.clear();
    }
}
