//! Core types shared by every game: grids, sides, status, RNG, errors and
//! configuration.
//!
//! Nothing here knows the rules of a particular game; the games build their
//! boards and sessions from these pieces.

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod side;
pub mod status;

pub use config::ArcadeConfig;
pub use error::{ConfigError, MoveError, StoreError};
pub use grid::{line_through, Coord, Grid, Line, AXES};
pub use rng::{GameRng, RandomSource, SequenceSource};
pub use side::{Scoreboard, Side};
pub use status::{GameResult, Status};
