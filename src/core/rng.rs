//! Injectable randomness for tile spawning, mine placement and piece selection.
//!
//! ## Key Features
//!
//! - **Injectable**: engines take any [`RandomSource`], never a global RNG
//! - **Deterministic**: `GameRng` with the same seed produces identical games
//! - **Context streams**: independent sequences per game from one arcade seed
//! - **Scriptable**: `SequenceSource` replays fixed draws in tests
//!
//! ```
//! use rust_arcade::core::{GameRng, RandomSource};
//!
//! let root = GameRng::new(42);
//! let mut tiles = root.for_context("2048");
//! let mut mines = root.for_context("minesweeper");
//!
//! let a = tiles.next_index(16);
//! let b = mines.next_index(64);
//! assert!(a < 16 && b < 64);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Source of uniform randomness consumed by the game engines.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` must be non-zero.
    fn next_index(&mut self, upper: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// Fisher-Yates shuffle driven by `next_index`.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource> RandomSource for &mut R {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        (**self).shuffle(items);
    }
}

/// Deterministic ChaCha8-backed random source.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, for sessions that do not need replay.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// regardless of how far this RNG has advanced, and across toolchains.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for GameRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// Replays a fixed script of draws, cycling when exhausted.
///
/// `next_index` returns `indices[i] % upper`; `chance` compares the next
/// scripted roll in `[0, 1)` against the probability.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    indices: Vec<usize>,
    rolls: Vec<f64>,
    next_index: usize,
    next_roll: usize,
}

impl SequenceSource {
    /// Script of indices only; every `chance` roll is `0.5`.
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            ..Self::default()
        }
    }

    /// Add a script of rolls for `chance`.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl Into<Vec<f64>>) -> Self {
        self.rolls = rolls.into();
        self
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "next_index needs a non-empty range");
        if self.indices.is_empty() {
            return 0;
        }
        let value = self.indices[self.next_index % self.indices.len()];
        self.next_index += 1;
        value % upper
    }

    fn chance(&mut self, probability: f64) -> bool {
        let roll = if self.rolls.is_empty() {
            0.5
        } else {
            let r = self.rolls[self.next_roll % self.rolls.len()];
            self.next_roll += 1;
            r
        };
        roll < probability
    }
}
