//! Key/value persistence
//!
//! The game persists two things: the best score (a bare integer) and the
//! player's settings (JSON). Both go through `KeyValueStore` so they can be
//! exercised without a browser:
//! - `local::LocalStore`: `window.localStorage` (wasm32)
//! - `MemoryStore`: in-process map (native, tests)

#[cfg(target_arch = "wasm32")]
pub mod local;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage backend (private browsing, disabled cookies, ...)
    #[error("storage unavailable")]
    Unavailable,
    /// Backend refused the write (quota, security)
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// String key/value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("missing"), None);
        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        assert_eq!(
            StorageError::WriteFailed("quota".into()).to_string(),
            "storage write failed: quota"
        );
    }
}
