//! Error types.
//!
//! Engine preconditions are assertions; these errors cover input rejected
//! at the session layer, bad configuration, and undecodable stored records.

use thiserror::Error;

use super::grid::Coord;

/// A move a session refused to apply. The session is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,
    #[error("game has not started")]
    NotStarted,
    #[error("game is paused")]
    Paused,
    #[error("cell {0} is out of bounds")]
    OutOfBounds(Coord),
    #[error("cell {0} is already occupied")]
    Occupied(Coord),
    #[error("column {0} does not exist")]
    NoSuchColumn(usize),
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("cell {0} is already revealed")]
    AlreadyRevealed(Coord),
    #[error("cell {0} is flagged")]
    Flagged(Coord),
}

/// Configuration that failed to load or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// A stored record that could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {key} is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("record {key} could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
