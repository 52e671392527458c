//! Key-value storage port backing todo persistence.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string-to-string storage, one value per key.
///
/// Writes overwrite the whole value; there are no partial updates.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium cannot be read.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the medium is full, or
    /// another [`StorageError`] when the write cannot be completed.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`; missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium cannot be written.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The storage medium cannot be accessed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },

    /// The key cannot be represented by this store.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl StorageError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
