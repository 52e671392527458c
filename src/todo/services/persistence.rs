//! Bridges the in-memory todo list to a key-value store.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::TodoConfig;
use crate::todo::{
    domain::{Todo, TodoDomainError, TodoList},
    ports::{KeyValueStore, StorageError},
};

/// Why stored todos could not be loaded.
#[derive(Debug, Clone, Error)]
pub enum LoadFailure {
    /// The store could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The stored value is not a JSON array of todo records.
    #[error("stored value is not a todo list: {0}")]
    Decode(Arc<serde_json::Error>),
    /// The decoded records break a list invariant.
    #[error("stored todo list is inconsistent: {0}")]
    Invalid(#[from] TodoDomainError),
}

/// Why the todo list could not be saved.
#[derive(Debug, Clone, Error)]
pub enum SaveFailure {
    /// The store rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The list could not be encoded.
    #[error("todo list could not be encoded: {0}")]
    Encode(Arc<serde_json::Error>),
}

/// Errors reported by [`TodoPersistence`].
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// The stored list could not be read back.
    #[error("failed to load saved todos: {0}")]
    LoadFailed(LoadFailure),
    /// The list could not be written.
    #[error("failed to save todos: {0}")]
    SaveFailed(SaveFailure),
}

/// Result of the one-time load.
///
/// `list` is always usable: it is empty on first run and after a failed
/// load, in which case `error` explains what went wrong.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Loaded list, or an empty list when nothing usable was stored.
    pub list: TodoList,
    /// Load failure, if any.
    pub error: Option<PersistenceError>,
}

/// Persistence adapter storing the whole list under one key.
pub struct TodoPersistence<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    key: String,
    max_text_length: usize,
}

impl<S> Clone for TodoPersistence<S>
where
    S: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            max_text_length: self.max_text_length,
        }
    }
}

impl<S> TodoPersistence<S>
where
    S: KeyValueStore,
{
    /// Creates an adapter over `store` using the key and text limit from
    /// `config`.
    #[must_use]
    pub fn new(store: Arc<S>, config: &TodoConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            max_text_length: config.max_text_length,
        }
    }

    /// Loads the stored list.
    ///
    /// A missing key yields an empty list without error. Unreadable or
    /// invalid data yields an empty list and
    /// [`PersistenceError::LoadFailed`]; the stored value is left untouched.
    pub async fn load(&self) -> LoadOutcome {
        match self.try_load().await {
            Ok(list) => {
                debug!(key = %self.key, count = list.len(), "loaded todo list");
                LoadOutcome { list, error: None }
            }
            Err(failure) => {
                warn!(key = %self.key, error = %failure, "starting with an empty todo list");
                LoadOutcome {
                    list: TodoList::new(),
                    error: Some(PersistenceError::LoadFailed(failure)),
                }
            }
        }
    }

    /// Overwrites the stored value with the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SaveFailed`] when encoding or the store
    /// write fails.
    pub async fn save(&self, list: &TodoList) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(list)
            .map_err(|err| PersistenceError::SaveFailed(SaveFailure::Encode(Arc::new(err))))?;
        self.store
            .set(&self.key, &encoded)
            .await
            .map_err(|err| PersistenceError::SaveFailed(SaveFailure::Storage(err)))?;
        debug!(key = %self.key, count = list.len(), "saved todo list");
        Ok(())
    }

    async fn try_load(&self) -> Result<TodoList, LoadFailure> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(TodoList::new());
        };
        let records: Vec<Todo> =
            serde_json::from_str(&raw).map_err(|err| LoadFailure::Decode(Arc::new(err)))?;
        Ok(TodoList::from_records(records, self.max_text_length)?)
    }
}
