//! Scores that survive a session.
//!
//! Each session exposes the one record worth keeping (win counters, best
//! score, best time) through [`Persistent`]. Records are stored as JSON
//! under fixed keys in any [`ScoreStore`]. A missing key means "no prior
//! score" and restores the record's default.
//!
//! ```rust
//! use rust_arcade::games::merge::Merge2048;
//! use rust_arcade::persist::{MemoryStore, Persistent, ScoreStoreExt};
//!
//! let mut store = MemoryStore::new();
//! let mut game = Merge2048::with_seed(7);
//! game.restore_from(&store).unwrap();
//! game.persist_to(&mut store).unwrap();
//! assert!(store.get_record::<u32>("2048BestScore").is_some());
//! ```

mod store;

pub use store::{load, save, MemoryStore, ScoreStore};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::StoreError;

/// Storage keys, one per game.
pub mod keys {
    pub const TICTACTOE_SCORES: &str = "tictactoeScores";
    pub const CONNECT_FOUR_SCORES: &str = "connectFourScores";
    pub const MERGE_BEST_SCORE: &str = "2048BestScore";
    pub const MINESWEEPER_BEST: &str = "minesweeperBest";
    pub const TETRIS_HIGH_SCORE: &str = "tetrisHighScore";
}

/// A session with a record worth keeping between games.
pub trait Persistent {
    /// Storage key of the record.
    const KEY: &'static str;

    /// The persisted record. `Default` is "no prior score".
    type Record: Serialize + DeserializeOwned + Default;

    /// Snapshot of the record.
    fn record(&self) -> Self::Record;

    /// Replace the record with a stored one.
    fn restore(&mut self, record: Self::Record);

    /// Load this session's record from `store`.
    fn restore_from<S: ScoreStore + ?Sized>(&mut self, store: &S) -> Result<(), StoreError> {
        let record = load(store, Self::KEY)?;
        self.restore(record);
        Ok(())
    }

    /// Write this session's record to `store`.
    fn persist_to<S: ScoreStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save(store, Self::KEY, &self.record())
    }

    /// Remove this session's record from `store` and reset it here.
    fn forget<S: ScoreStore + ?Sized>(&mut self, store: &mut S) {
        store.remove(Self::KEY);
        self.restore(Self::Record::default());
    }
}

/// Typed convenience reads.
pub trait ScoreStoreExt: ScoreStore {
    /// Decode the record under `key`; `None` if absent or malformed.
    fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| serde_json::from_str(&raw).ok())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStoreExt for S {}
