//! 2048 play session.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{ConfigError, GameRng, MoveError, RandomSource, Status};
use crate::persist::{keys, Persistent};

use super::engine::{is_game_over, max_tile, slide, spawn_random_tile, Board, Direction, Spawn};

/// 2048 configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Merge2048Config {
    /// Board side length.
    pub size: usize,

    /// Tile value that wins the game.
    pub goal: u32,

    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,

    /// Tiles placed at the start of a game.
    pub start_tiles: usize,

    /// Keep playing after reaching the goal until the board is stuck.
    pub keep_playing: bool,
}

impl Default for Merge2048Config {
    fn default() -> Self {
        Self {
            size: 4,
            goal: 2048,
            four_probability: 0.1,
            start_tiles: 2,
            keep_playing: true,
        }
    }
}

impl Merge2048Config {
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal;
        self
    }

    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    #[must_use]
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    #[must_use]
    pub fn with_keep_playing(mut self, keep_playing: bool) -> Self {
        self.keep_playing = keep_playing;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::invalid("merge.size", "board must be at least 2x2"));
        }
        if self.goal < 4 || !self.goal.is_power_of_two() {
            return Err(ConfigError::invalid(
                "merge.goal",
                format!("{} is not a power of two above 2", self.goal),
            ));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::invalid(
                "merge.four_probability",
                format!("{} is not a probability", self.four_probability),
            ));
        }
        if self.start_tiles > self.size * self.size {
            return Err(ConfigError::invalid(
                "merge.start_tiles",
                "more start tiles than cells",
            ));
        }
        Ok(())
    }
}

/// A game of 2048.
///
/// The game starts as soon as it is created. Every accepted shift spawns
/// exactly one tile; a shift that moves nothing is ignored.
#[derive(Clone, Debug)]
pub struct Merge2048<R = GameRng> {
    config: Merge2048Config,
    board: Board,
    score: u32,
    best: u32,
    won: bool,
    status: Status,
    moves: u32,
    last_spawn: Option<Spawn>,
    rng: R,
}

impl Merge2048<GameRng> {
    /// Default rules with a seeded generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Merge2048Config::default(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Merge2048<R> {
    pub fn new(config: Merge2048Config, rng: R) -> Self {
        let board = Board::filled(config.size, config.size, 0);
        let mut game = Self {
            config,
            board,
            score: 0,
            best: 0,
            won: false,
            status: Status::NotStarted,
            moves: 0,
            last_spawn: None,
            rng,
        };
        game.restart();
        game
    }

    /// Resume from an existing board with score 0.
    pub fn from_board(config: Merge2048Config, board: Board, rng: R) -> Self {
        let mut game = Self {
            config,
            board,
            score: 0,
            best: 0,
            won: false,
            status: Status::InProgress,
            moves: 0,
            last_spawn: None,
            rng,
        };
        game.won = max_tile(&game.board) >= game.config.goal;
        game.check_over();
        game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best
    }

    /// Whether the goal tile has been reached in this game.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Accepted shifts in this game.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Tile spawned by the last accepted shift (or the last start tile).
    #[must_use]
    pub fn last_spawn(&self) -> Option<Spawn> {
        self.last_spawn
    }

    #[must_use]
    pub fn config(&self) -> &Merge2048Config {
        &self.config
    }

    /// Slide the board. Returns whether anything moved.
    pub fn shift(&mut self, direction: Direction) -> Result<bool, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let outcome = slide(&self.board, direction);
        if !outcome.moved {
            return Ok(false);
        }

        self.board = outcome.board;
        self.score += outcome.score_delta;
        self.best = self.best.max(self.score);
        self.moves += 1;
        if outcome.max_merge >= self.config.goal && !self.won {
            self.won = true;
            info!(score = self.score, moves = self.moves, "goal tile reached");
        }

        self.last_spawn =
            spawn_random_tile(&mut self.board, &mut self.rng, self.config.four_probability);
        self.check_over();
        Ok(true)
    }

    /// Start a new game. The best score is kept.
    pub fn restart(&mut self) {
        self.board = Board::filled(self.config.size, self.config.size, 0);
        self.score = 0;
        self.won = false;
        self.moves = 0;
        self.last_spawn = None;
        for _ in 0..self.config.start_tiles {
            self.last_spawn =
                spawn_random_tile(&mut self.board, &mut self.rng, self.config.four_probability);
        }
        self.status = Status::InProgress;
        self.check_over();
    }

    fn check_over(&mut self) {
        let stuck = is_game_over(&self.board);
        if !(stuck || (self.won && !self.config.keep_playing)) {
            return;
        }

        self.status = if self.won { Status::Won } else { Status::Lost };
        info!(
            status = ?self.status,
            score = self.score,
            max_tile = max_tile(&self.board),
            "2048 game over"
        );
    }
}

impl<R: RandomSource> Persistent for Merge2048<R> {
    const KEY: &'static str = keys::MERGE_BEST_SCORE;
    type Record = u32;

    fn record(&self) -> u32 {
        self.best
    }

    fn restore(&mut self, record: u32) {
        self.best = record;
    }
}
