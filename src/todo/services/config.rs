//! Runtime configuration for todo services.

use crate::todo::domain::DEFAULT_MAX_TEXT_LENGTH;

/// Storage key under which the todo list is persisted.
pub const STORAGE_KEY: &str = "toist-todos";

/// Character limit used by [`TodoConfig::strict`].
const STRICT_MAX_TEXT_LENGTH: usize = 200;

/// Configuration shared by the controller and the persistence adapter.
///
/// # Examples
///
/// ```
/// use toist::todo::services::{STORAGE_KEY, TodoConfig};
///
/// let config = TodoConfig::default();
/// assert_eq!(config.max_text_length, 500);
/// assert_eq!(config.storage_key, STORAGE_KEY);
///
/// let strict = TodoConfig::strict();
/// assert_eq!(strict.max_text_length, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Maximum todo text length in characters, applied to input and loads.
    pub max_text_length: usize,
    /// Key the whole list is stored under.
    pub storage_key: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            storage_key: STORAGE_KEY.to_owned(),
        }
    }
}

impl TodoConfig {
    /// Creates a configuration with the shorter 200-character limit.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_text_length: STRICT_MAX_TEXT_LENGTH,
            ..Self::default()
        }
    }

    /// Sets the maximum text length.
    #[must_use]
    pub const fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    /// Sets the storage key.
    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}
