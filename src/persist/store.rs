//! Key-value score storage.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::core::StoreError;

/// String key-value storage for records that outlive a session.
///
/// Modelled on browser local storage: flat string keys, string values,
/// no transactions.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Decode the record under `key`, or its default when the key is absent.
pub fn load<T, S>(store: &S, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: ScoreStore + ?Sized,
{
    match store.get(key) {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            key: key.to_owned(),
            source,
        }),
        None => Ok(T::default()),
    }
}

/// Encode `value` as JSON under `key`.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: ScoreStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    trace!(key, value = %raw, "record saved");
    store.set(key, raw);
    Ok(())
}
