//! Port contracts for todo persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod storage;

pub use storage::{KeyValueStore, StorageError, StorageResult};
