//! Storage backend abstraction.
//!
//! The [`Store`] trait is a durable key/value contract: values are JSON
//! documents addressed by a string key. It deliberately knows nothing about
//! movies so that backends stay interchangeable; typed access goes through
//! [`read_or`] and [`write_value`].

use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): one JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map, used in tests
///
/// # Examples
///
/// ```
/// use movielist::storage::{read_or, write_value, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// assert_eq!(read_or(&store, "count", 0_u32)?, 0);
/// write_value(&mut store, "count", &3_u32)?;
/// assert_eq!(read_or(&store, "count", 0_u32)?, 3);
/// # Ok::<(), movielist::domain::MovieListError>(())
/// ```
pub trait Store: Send {
    /// Returns the value stored under `key`, or `None` if nothing was ever
    /// written there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value, and makes
    /// the change durable before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn write(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// Reads and decodes the value under `key`, falling back to `default` when the
/// key is absent.
///
/// # Errors
///
/// Returns an error if the backend fails or the stored value does not decode
/// as `T`.
pub fn read_or<T: DeserializeOwned>(store: &dyn Store, key: &str, default: T) -> Result<T> {
    match store.read(key)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => {
            tracing::debug!(key = %key, "key absent, using default");
            Ok(default)
        }
    }
}

/// Encodes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails.
pub fn write_value<T: Serialize + ?Sized>(store: &mut dyn Store, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    store.write(key, &value)
}
