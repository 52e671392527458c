//! Validated todo text.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum todo text length in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 500;

/// Trimmed, non-empty todo text.
///
/// The maximum length is supplied by the caller so that one configured bound
/// applies both to new input and to records read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoText(String);

impl TodoText {
    /// Trims `raw` and validates it against `max_length`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyInput`] when nothing remains after
    /// trimming, or [`TodoDomainError::TooLong`] when the trimmed text has
    /// more than `max_length` characters.
    pub fn parse(raw: &str, max_length: usize) -> Result<Self, TodoDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyInput);
        }

        let actual = trimmed.chars().count();
        if actual > max_length {
            return Err(TodoDomainError::TooLong {
                max: max_length,
                actual,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Re-checks text that bypassed [`Self::parse`], such as decoded records.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::parse`], or
    /// [`TodoDomainError::Untrimmed`] when the text is not already trimmed.
    pub fn validate(&self, max_length: usize) -> Result<(), TodoDomainError> {
        let parsed = Self::parse(&self.0, max_length)?;
        if parsed != *self {
            return Err(TodoDomainError::Untrimmed);
        }
        Ok(())
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
