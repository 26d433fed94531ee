//! Minimax search configuration.

use serde::{Deserialize, Serialize};

/// Minimax search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched below the root move before falling back to the
    /// heuristic evaluation (`None` = search to terminal positions).
    pub max_depth: Option<u32>,

    /// Base score of a completed line. A win found `p` plies below the
    /// root move scores `win_score - p`, a loss `p - win_score`, so faster
    /// wins and slower losses are preferred.
    pub win_score: i32,

    /// Skip branches already proven worse than an examined alternative.
    /// Never changes the chosen move, only the number of nodes visited.
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::exhaustive()
    }
}

impl SearchConfig {
    /// Full-depth search scored `10 - depth` (Tic-Tac-Toe).
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            max_depth: None,
            win_score: 10,
            alpha_beta: true,
        }
    }

    /// Depth-limited search with heuristic leaves scored `1000 - depth`
    /// (Connect Four).
    #[must_use]
    pub fn depth_limited(depth: u32) -> Self {
        Self {
            max_depth: Some(depth),
            win_score: 1000,
            alpha_beta: true,
        }
    }

    /// Create a new config with custom max depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with a custom win score.
    #[must_use]
    pub fn with_win_score(mut self, score: i32) -> Self {
        self.win_score = score;
        self
    }

    /// Create a new config with pruning switched on or off.
    #[must_use]
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }
}
