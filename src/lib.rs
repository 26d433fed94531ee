//! # rust-arcade
//!
//! Rules engines for five classic single-screen games, with a shared
//! minimax search for the two-player ones.
//!
//! ## Design Principles
//!
//! 1. **Pure rules, thin sessions**: board transforms (`slide`, `reveal`,
//!    `lock_piece`, ...) take their inputs explicitly and are testable in
//!    isolation. Session types own the state and enforce move legality.
//!
//! 2. **Injected randomness**: every random choice goes through
//!    `RandomSource`. Seeded `GameRng` streams make tile spawns, mine
//!    layouts and piece sequences reproducible.
//!
//! 3. **Host-driven time**: nothing here owns a timer. Hosts call
//!    `Tetris::tick` and `Minesweeper::tick` on their own clock.
//!
//! ## Modules
//!
//! - `core`: Grids, sides, status, RNG, errors, configuration
//! - `search`: Minimax with alpha-beta pruning over `Adversarial` games
//! - `games`: Tic-Tac-Toe, Connect Four, 2048, Minesweeper, Tetris
//! - `persist`: Score records behind a key-value `ScoreStore`
//!
//! ## Usage
//!
//! ```
//! use rust_arcade::{Direction, Merge2048};
//!
//! let mut game = Merge2048::with_seed(1);
//! for dir in Direction::ALL {
//!     if game.shift(dir).unwrap() {
//!         break;
//!     }
//! }
//! assert!(game.moves() <= 1);
//! ```

pub mod core;
pub mod games;
pub mod persist;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, ConfigError, Coord, GameRng, GameResult, Grid, MoveError,
    RandomSource, Scoreboard, Side, Status, StoreError,
};

pub use crate::search::{Adversarial, Minimax, SearchConfig, SearchStats};

pub use crate::games::connect_four::{ConnectFour, ConnectFourConfig, EvalWeights};
pub use crate::games::merge::{Direction, Merge2048, Merge2048Config};
pub use crate::games::mines::{Minesweeper, MinesweeperConfig};
pub use crate::games::tetris::{Tetris, TetrisConfig, Tetromino};
pub use crate::games::tictactoe::{TicTacToe, TicTacToeConfig};

pub use crate::persist::{MemoryStore, Persistent, ScoreStore};
