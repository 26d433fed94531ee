//! Tetris: seven tetrominoes in a 10x20 well.
//!
//! Pieces spawn centred at the top, rotate clockwise without wall kicks
//! and lock when they can no longer fall. Clearing `n` rows at once scores
//! `LINE_SCORES[n] * level`; the level rises every ten rows and shortens
//! the gravity interval.

mod piece;
mod session;
mod well;

pub use piece::{filled_cells, rotate, shape, PieceQueue, Randomizer, Shape, Tetromino};
pub use session::{ActivePiece, Fall, Tetris, TetrisConfig};
pub use well::{drop_interval, level_for, line_clear_score, Row, Well, HEIGHT, LINE_SCORES, WIDTH};
