//! Error types for session storage.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Reasons a stored favorite is refused on load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoriteError {
    /// The modifier lies outside `-MAX_MODIFIER..=MAX_MODIFIER`.
    #[error("modifier {0} is out of range")]
    ModifierOutOfRange(i64),

    /// The groups add up to more dice than a pool may hold.
    #[error("{0} dice exceed the pool limit")]
    TooManyDice(u64),
}

/// Errors raised while loading or saving persisted collections.
///
/// None of these ever reach the state machine: hydration turns them into
/// warnings and the background writer logs them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be used as a storage name.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the backing file failed.
    #[error("failed to access '{key}': {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Stored text for a key could not be parsed.
    #[error("malformed '{key}' data: {source}")]
    Malformed {
        /// The key whose data was malformed.
        key: String,
        /// The parse failure.
        source: serde_json::Error,
    },

    /// A collection could not be encoded for storage.
    #[error("failed to encode '{key}': {source}")]
    Encode {
        /// The key being encoded.
        key: String,
        /// The encoding failure.
        source: serde_json::Error,
    },
}
