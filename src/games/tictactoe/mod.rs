//! Tic-Tac-Toe against an unbeatable computer opponent.
//!
//! The computer plays `O` and searches the full game tree: wins are scored
//! `10 - ply`, losses `ply - 10`, draws 0. Among equally good cells it takes
//! the lowest index.

mod board;
mod session;

pub use board::{Board, CELLS, SIZE};
pub use session::{TicTacToe, TicTacToeConfig, AI_SIDE};
