//! Connect Four against a depth-limited computer opponent.
//!
//! The computer searches 4 plies below its candidate move with alpha-beta
//! pruning. Wins are scored `1000 - ply`; positions at the depth limit are
//! scored by [`evaluate`].

mod board;
mod eval;
mod session;

pub use board::{Board, Weighted, COLS, CONNECT, ROWS};
pub use eval::{evaluate, score_window, EvalWeights};
pub use session::{ConnectFour, ConnectFourConfig, AI_SIDE};
