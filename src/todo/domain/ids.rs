//! Identifier types and identifier generation for todo records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Number of random hex characters appended to timestamp identifiers.
const RANDOM_SUFFIX_LEN: usize = 8;

/// Opaque identifier for a todo record.
///
/// Identifiers are stable for the lifetime of a record and are persisted as
/// plain JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh todo identifiers.
///
/// Generation receives the creation instant so time-based schemes stay
/// deterministic under a mocked clock.
pub trait TodoIdGenerator: Send + Sync {
    /// Produces the next identifier for a record created at `now`.
    fn next_id(&self, now: DateTime<Utc>) -> TodoId;

    /// Records an identifier that is already in use.
    ///
    /// Deterministic generators move past it so later calls to
    /// [`Self::next_id`] never return it. Random generators ignore it.
    fn reserve(&self, _taken: &TodoId) {}
}

/// Generates `<unix-millis>-<random hex>` identifiers.
///
/// The random suffix keeps identifiers unique when several records are
/// created within the same millisecond.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl TodoIdGenerator for TimestampIdGenerator {
    fn next_id(&self, now: DateTime<Utc>) -> TodoId {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(RANDOM_SUFFIX_LEN)
            .collect();
        TodoId(format!("{}-{suffix}", now.timestamp_millis()))
    }
}

/// Prefix of identifiers produced by [`SequentialIdGenerator`].
const SEQUENTIAL_PREFIX: &str = "todo-";

/// Generates `todo-1`, `todo-2`, ... in order.
///
/// Reserved `todo-<n>` identifiers advance the sequence past `n`, so a
/// generator created for a reopened list continues after the stored ids.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first identifier is `todo-1`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }
}

impl TodoIdGenerator for SequentialIdGenerator {
    fn next_id(&self, _now: DateTime<Utc>) -> TodoId {
        let value = self.next.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        TodoId(format!("{SEQUENTIAL_PREFIX}{value}"))
    }

    fn reserve(&self, taken: &TodoId) {
        let issued = taken
            .as_str()
            .strip_prefix(SEQUENTIAL_PREFIX)
            .and_then(|suffix| suffix.parse::<u64>().ok());
        if let Some(value) = issued {
            self.next.fetch_max(value, Ordering::Relaxed);
        }
    }
}
