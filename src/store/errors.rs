//! Store errors.

use std::{io, sync::PoisonError};

use thiserror::Error;

/// Errors raised by the key-value store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage cannot be used at all.
    #[error("store is unavailable")]
    Unavailable,

    /// Reading or writing the record for `key` failed.
    #[error("store I/O failed for key {key}")]
    Io {
        /// Key being accessed.
        key: String,

        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A record could not be serialized to JSON.
    #[error("failed to encode record")]
    Encode(#[source] serde_json::Error),

    /// The key cannot be mapped onto the backend's namespace.
    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Unavailable
    }
}
