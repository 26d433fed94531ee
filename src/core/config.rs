//! Arcade-wide configuration.
//!
//! Hosts configure every game at startup through one `ArcadeConfig`,
//! usually loaded from JSON. Sections left out of the document fall back to
//! the per-game defaults.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ConfigError;
use super::rng::GameRng;
use crate::games::connect_four::ConnectFourConfig;
use crate::games::merge::Merge2048Config;
use crate::games::mines::MinesweeperConfig;
use crate::games::tetris::TetrisConfig;
use crate::games::tictactoe::TicTacToeConfig;
use crate::search::SearchConfig;

/// Configuration for every game in the arcade.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Master seed. `None` draws fresh entropy for each game.
    pub seed: Option<u64>,
    pub tictactoe: TicTacToeConfig,
    pub connect_four: ConnectFourConfig,
    pub merge: Merge2048Config,
    pub minesweeper: MinesweeperConfig,
    pub tetris: TetrisConfig,
}

impl ArcadeConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(seed = ?config.seed, "arcade config loaded");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_search("tictactoe.search", &self.tictactoe.search)?;
        check_search("connect_four.search", &self.connect_four.search)?;
        self.merge.validate()?;
        self.minesweeper.validate()?;
        self.tetris.validate()
    }

    /// Random stream for `game`.
    ///
    /// With a master seed each game gets its own reproducible stream, so
    /// playing one game never shifts the tiles or mines of another.
    #[must_use]
    pub fn rng_for(&self, game: &str) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed).for_context(game),
            None => GameRng::from_entropy(),
        }
    }
}

fn check_search(field: &'static str, search: &SearchConfig) -> Result<(), ConfigError> {
    if search.win_score <= 0 {
        return Err(ConfigError::invalid(field, "win_score must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RandomSource;

    #[test]
    fn test_defaults_are_valid() {
        let config = ArcadeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
        assert_eq!(config.minesweeper.mines, 10);
        assert_eq!(config.connect_four.search.max_depth, Some(4));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ArcadeConfig::from_json(
            r#"{ "seed": 7, "minesweeper": { "rows": 9, "cols": 9, "mines": 12 } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.minesweeper.rows, 9);
        assert_eq!(config.minesweeper.mines, 12);
        assert_eq!(config.merge, Merge2048Config::default());
    }

    #[test]
    fn test_invalid_mine_count_rejected() {
        let err = ArcadeConfig::from_json(
            r#"{ "minesweeper": { "rows": 3, "cols": 3, "mines": 1 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "minesweeper.mines",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ArcadeConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ArcadeConfig::default().with_seed(3);
        let json = config.to_json().unwrap();
        assert_eq!(ArcadeConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rng_streams_are_per_game() {
        let config = ArcadeConfig::default().with_seed(42);

        let mut a = config.rng_for("merge");
        let mut b = config.rng_for("merge");
        let mut c = config.rng_for("minesweeper");

        let draws =
            |rng: &mut GameRng| -> Vec<usize> { (0..8).map(|_| rng.next_index(1000)).collect() };
        let first = draws(&mut a);
        assert_eq!(first, draws(&mut b));
        assert_ne!(first, draws(&mut c));
    }
}
