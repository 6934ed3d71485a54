//! Best score
//!
//! A single integer persisted under `bubblePopBest`. Read once at startup,
//! written back whenever a pop raises it.

use crate::persistence::{KeyValueStore, StorageError};

/// Persisted best pop count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore(pub u32);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bubblePopBest";

    /// Load from storage. Missing or unparsable values count as 0.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = store
            .get_item(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);
        log::info!("Best score: {}", best);
        Self(best)
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set_item(Self::STORAGE_KEY, &self.0.to_string())?;
        log::debug!("Best score saved ({})", self.0);
        Ok(())
    }

    /// Raise to `score` if higher. Returns true if it changed.
    pub fn raise(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            return true;
        }
        false
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store), BestScore(0));
    }

    #[test]
    fn test_load_garbage_is_zero() {
        let mut store = MemoryStore::new();
        store.set_item(BestScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(BestScore::load(&store), BestScore(0));
        store.set_item(BestScore::STORAGE_KEY, "-4").unwrap();
        assert_eq!(BestScore::load(&store), BestScore(0));
    }

    #[test]
    fn test_save_and_reload() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::default();
        assert!(best.raise(5));
        best.save(&mut store).unwrap();
        assert_eq!(store.get_item("bubblePopBest").as_deref(), Some("5"));

        let mut reloaded = BestScore::load(&store);
        assert_eq!(reloaded.get(), 5);
        assert!(!reloaded.raise(3));
        assert_eq!(reloaded.get(), 5);
    }
}
