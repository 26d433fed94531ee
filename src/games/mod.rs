//! The five games.
//!
//! Each game splits into pure rules (board, engine or field functions that
//! take their inputs explicitly) and a session type that owns the state,
//! the random source and the persisted record.

pub mod connect_four;
pub mod merge;
pub mod mines;
pub mod tetris;
pub mod tictactoe;
