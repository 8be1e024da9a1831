//! High score tracking
//!
//! A single non-negative scalar, read once at startup and overwritten whenever
//! a run surpasses it. Persisting is best-effort: a failed write is logged and
//! the in-memory value stays authoritative for the session.

use crate::persistence::{self, KeyValueStore};

/// Best score ever recorded, backed by a key-value store
pub struct HighScore {
    best: u64,
    store: Box<dyn KeyValueStore>,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "aircraft_shooter_high_score";

    /// Load the stored high score (0 if absent or unreadable)
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best = match persistence::load_json::<u64>(store.as_ref(), Self::STORAGE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score, starting from 0: {}", e);
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a score; persists and returns true if it beats the best
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = persistence::save_json(self.store.as_mut(), Self::STORAGE_KEY, &score) {
            log::warn!("Failed to persist high score {}: {}", score, e);
        }
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, PersistenceError, Result};

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("77".to_owned()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(PersistenceError::Unavailable("read-only".to_owned()))
        }
    }

    #[test]
    fn test_defaults_to_zero() {
        let high = HighScore::load(Box::new(MemoryStore::new()));
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_record_is_monotonic() {
        let mut high = HighScore::load(Box::new(MemoryStore::new()));
        assert!(high.record(100));
        assert!(!high.record(50));
        assert!(!high.record(100));
        assert_eq!(high.best(), 100);
    }

    #[test]
    fn test_loads_stored_value() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "900").unwrap();
        let high = HighScore::load(Box::new(store));
        assert_eq!(high.best(), 900);
    }

    #[test]
    fn test_corrupt_value_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "-3").unwrap();
        let high = HighScore::load(Box::new(store));
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_failed_write_keeps_session_value() {
        let mut high = HighScore::load(Box::new(ReadOnlyStore));
        assert_eq!(high.best(), 77);
        assert!(high.record(80));
        assert_eq!(high.best(), 80);
    }
}
