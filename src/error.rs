//! # Error Types
//!
//! Every fallible operation in the engine reports one of the errors below.
//! Malformed persisted data is deliberately absent from this list: it is
//! recovered locally by falling back to defaults and only logged.

use thiserror::Error;

/// Failures of the key-value store backing the autosave.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file-backed store could not read or write one of its keys.
    #[error("store key `{key}` could not be accessed: {source}")]
    Io {
        /// The key being read or written
        key: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Reasons an externally supplied world snapshot is rejected.
///
/// A rejected import never mutates the running world.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The text is not valid JSON or has the wrong shape.
    #[error("world snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The snapshot has no `blocks` list.
    #[error("world snapshot has no `blocks` list")]
    MissingBlocks,
    /// The snapshot has no `player` object.
    #[error("world snapshot has no `player` object")]
    MissingPlayer,
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration cannot produce a playable world.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    /// The autosave store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An import was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// World state could not be serialized.
    #[error("failed to serialize world state: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Reading a config file or writing an export failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
