//! 2048: slide tiles, merge equal pairs, reach the goal tile.

mod engine;
mod session;

pub use engine::{
    collapse_row, empty_cells, is_game_over, max_tile, slide, spawn_random_tile, Board, Direction,
    RowCollapse, SlideOutcome, Spawn,
};
pub use session::{Merge2048, Merge2048Config};
