use std::collections::HashMap;

use folio_core::traits::BlobStore;
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EphemeralError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Process-local blob store; contents vanish with the process.
pub struct EphemeralBlobStore {
    map: RwLock<HashMap<String, Value>>,
}

impl EphemeralBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.map.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drops a whole document, the only way back to an empty collection.
    pub fn remove(&self, key: &str) -> bool {
        self.map.write().remove(key).is_some()
    }
}

impl Default for EphemeralBlobStore {
    fn default() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }
}

impl BlobStore for EphemeralBlobStore {
    type Error = EphemeralError;

    fn get_json(&self, key: &str) -> Result<Option<Value>, Self::Error> {
        Ok(self.map.read().get(key).cloned())
    }

    fn put_json(&self, key: &str, value: &Value) -> Result<(), Self::Error> {
        if key.is_empty() {
            return Err(EphemeralError::InvalidKey(key.to_owned()));
        }
        self.map.write().insert(key.to_owned(), value.clone());
        Ok(())
    }
}
