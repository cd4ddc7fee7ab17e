//! Error types for the movielist plugin.
//!
//! [`MovieListError`] covers failures in the plugin's own machinery (storage,
//! worker IPC, configuration). Outcomes of remote lookups are a separate concern
//! and live in [`crate::query::FetchError`], because they are part of the
//! observable fetch state rather than faults of the plugin.

use thiserror::Error;

/// The main error type for movielist plugin operations.
///
/// # Examples
///
/// ```
/// use movielist::domain::MovieListError;
///
/// fn validate_key(key: &str) -> Result<(), MovieListError> {
///     if key.is_empty() {
///         return Err(MovieListError::Config("api_key is empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum MovieListError {
    /// Reading or writing the persisted store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for movielist operations.
pub type Result<T> = std::result::Result<T, MovieListError>;
