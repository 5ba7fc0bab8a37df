//! Persistent Store
//!
//! A raw key-value string store ([`KeyValueStore`]) and a typed JSON adapter on top of
//! it ([`JsonStore`]). Reads never fail: missing, corrupt or unreachable records decode
//! to a tagged [`Decoded`] value which callers collapse to a default.

mod errors;
mod file;
mod memory;

use std::{fmt, sync::Arc};

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

pub use errors::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed keys of the persisted store layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The in-progress cart.
    Cart,

    /// Every booking made, cancelled ones included.
    Bookings,

    /// The signed-in user.
    User,

    /// The opaque session token.
    AuthToken,
}

impl StoreKey {
    /// Every key in the layout.
    pub const ALL: [StoreKey; 4] = [Self::Cart, Self::Bookings, Self::User, Self::AuthToken];

    /// Storage name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Bookings => "bookings",
            Self::User => "user",
            Self::AuthToken => "authToken",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw string storage, the equivalent of browser local storage.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Result of decoding a persisted record.
#[derive(Debug)]
pub enum Decoded<T> {
    /// The record was present and well-formed.
    Value(T),

    /// Nothing is stored under the key.
    Missing,

    /// The stored text is not valid JSON for the expected type.
    Corrupt(serde_json::Error),

    /// The store could not be read.
    Unavailable(StoreError),
}

impl<T> Decoded<T> {
    /// The decoded value, if there was one.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Corrupt(_) | Self::Unavailable(_) => None,
        }
    }

    /// Whether the record was present but could not be decoded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

impl<T: Default> Decoded<T> {
    /// The decoded value, or the type's empty default.
    pub fn value_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// Typed JSON records over a [`KeyValueStore`].
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStore").finish_non_exhaustive()
    }
}

impl JsonStore {
    /// Wrap a raw backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A fresh store backed by a [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Decode the record under `key`.
    ///
    /// Corrupt and unreachable records are logged here and reported in the result;
    /// nothing is propagated as an error.
    pub fn decode<T: DeserializeOwned>(&self, key: StoreKey) -> Decoded<T> {
        let raw = match self.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Decoded::Missing,
            Err(error) => {
                warn!(%key, %error, "store unavailable; treating record as empty");
                return Decoded::Unavailable(error);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Decoded::Value(value),
            Err(error) => {
                warn!(%key, %error, "corrupt record in store; treating as empty");
                Decoded::Corrupt(error)
            }
        }
    }

    /// Read the record under `key`, or its empty default.
    pub fn read<T: DeserializeOwned + Default>(&self, key: StoreKey) -> T {
        self.decode(key).value_or_default()
    }

    /// Read the undecoded text under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    pub fn read_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.backend.get(key.as_str())
    }

    /// Replace the record under `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding fails or the backend rejects the write.
    pub fn write<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value).map_err(StoreError::Encode)?;

        self.backend.set(key.as_str(), &encoded)?;

        debug!(%key, bytes = encoded.len(), "record written");

        Ok(())
    }

    /// Remove the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend rejects the removal.
    pub fn clear(&self, key: StoreKey) -> Result<(), StoreError> {
        self.backend.remove(key.as_str())?;

        debug!(%key, "record cleared");

        Ok(())
    }
}
