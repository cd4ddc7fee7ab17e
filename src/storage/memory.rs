//! In-memory storage backend.

use crate::domain::error::Result;
use crate::storage::backend::Store;
use serde_json::Value;
use std::collections::BTreeMap;

/// A [`Store`] that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}
