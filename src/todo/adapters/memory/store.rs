//! In-memory key-value store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::todo::ports::{KeyValueStore, StorageError, StorageResult};

/// Thread-safe in-memory key-value store.
///
/// Optionally enforces a byte quota over all keys and values, and can be
/// switched to an unavailable state to exercise failure handling.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
    writes: usize,
}

impl InMemoryStoreState {
    fn usage_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| existing.len().saturating_add(stored.len()))
            .sum();
        others.saturating_add(key.len()).saturating_add(value.len())
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "in-memory store is switched off".to_owned(),
            ));
        }
        Ok(())
    }
}

impl InMemoryKeyValueStore {
    /// Creates an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::new();
        store.write_state().quota_bytes = Some(quota_bytes);
        store
    }

    /// Seeds a value without counting it as a write.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.write_state().entries.insert(key.into(), value.into());
        self
    }

    /// Switches the store between available and unavailable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.write_state().unavailable = unavailable;
    }

    /// Returns the stored value without going through the async port.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.read_state().entries.get(key).cloned()
    }

    /// Returns how many successful writes the store has accepted.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.read_state().writes
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, InMemoryStoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryStoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let state = self.read_state();
        state.ensure_available()?;
        Ok(state.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.write_state();
        state.ensure_available()?;
        let over_quota = state
            .quota_bytes
            .is_some_and(|quota| state.usage_with(key, value) > quota);
        if over_quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
            });
        }
        state.entries.insert(key.to_owned(), value.to_owned());
        state.writes = state.writes.saturating_add(1);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut state = self.write_state();
        state.ensure_available()?;
        state.entries.remove(key);
        Ok(())
    }
}
