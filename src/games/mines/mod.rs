//! Minesweeper with a guaranteed-safe first click.

mod field;
mod session;

pub use field::{
    check_win, count_flags, in_safe_zone, place_mines, reveal, reveal_mines, toggle_flag, Cell,
    Field,
};
pub use session::{Minesweeper, MinesweeperConfig};
