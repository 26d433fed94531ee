//! Adversarial search for the two-player placement games.
//!
//! ## Overview
//!
//! A single generic minimax searcher drives both AI opponents:
//!
//! - **Exhaustive**: Tic-Tac-Toe is searched to terminal positions
//! - **Depth-limited**: Connect Four stops 4 plies below the root move and
//!   falls back to a heuristic evaluation
//! - **Alpha-beta**: optional pruning that never changes the chosen move
//! - **Deterministic**: ties go to the first legal move in scan order
//!
//! ## Usage
//!
//! ```rust
//! use rust_arcade::core::Side;
//! use rust_arcade::games::connect_four::Board;
//! use rust_arcade::search::{Minimax, SearchConfig};
//!
//! let board = Board::new();
//! let mut search = Minimax::new(SearchConfig::depth_limited(4));
//!
//! let column = search.best_move(&board, Side::Second).unwrap();
//! assert!(column < 7);
//! println!("searched {} nodes", search.stats().nodes);
//! ```

pub mod config;
pub mod minimax;
pub mod stats;

pub use config::SearchConfig;
pub use minimax::{Adversarial, Minimax, MoveList};
pub use stats::SearchStats;
