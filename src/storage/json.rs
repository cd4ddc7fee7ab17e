//! JSON file-based storage backend.
//!
//! All keys live in one human-readable JSON document. Writes go to a temporary
//! file first and are then renamed over the target, so a crash never leaves a
//! half-written store behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "values": {
//!     "watched": [
//!       { "imdb_id": "tt0133093", "title": "The Matrix", "user_rating": 9, ... }
//!     ]
//!   }
//! }
//! ```

use crate::domain::error::{MovieListError, Result};
use crate::storage::backend::Store;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    values: BTreeMap<String, Value>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole document is kept in memory and rewritten on every change. The
/// type is `Send` but not `Sync`; it is owned by the single worker thread.
pub struct JsonStore {
    file_path: PathBuf,
    data: StoreData,
    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStore {
    /// Creates or opens a JSON store.
    ///
    /// Loads the file if it exists, otherwise starts empty. Parent directories
    /// are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use movielist::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::new(PathBuf::from("/tmp/watched.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(key_count = data.values.len(), "store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| MovieListError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, keys = data.values.len(), "loaded store data");
        Ok(data)
    }

    /// Saves the document using write-to-temp plus rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| MovieListError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl Store for JsonStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let value = self.data.values.get(key).cloned();
        tracing::debug!(key = %key, found = value.is_some(), "store read");
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        let _span = tracing::debug_span!("json_store_write", key = %key).entered();

        if !self.dirty && self.data.values.get(key) == Some(value) {
            tracing::trace!("value unchanged and already on disk");
            return Ok(());
        }

        self.data.values.insert(key.to_string(), value.clone());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
