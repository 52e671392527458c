//! Error types for todo domain validation.

use super::TodoId;
use thiserror::Error;

/// Errors returned while constructing or validating todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The todo text is empty after trimming.
    #[error("todo text must not be empty")]
    EmptyInput,

    /// The todo text exceeds the configured maximum length.
    #[error("todo text is {actual} characters long, the limit is {max}")]
    TooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Length of the trimmed input in characters.
        actual: usize,
    },

    /// Stored text carries surrounding whitespace.
    #[error("todo text must not start or end with whitespace")]
    Untrimmed,

    /// Two records share the same identifier.
    #[error("duplicate todo identifier: {0}")]
    DuplicateId(TodoId),

    /// The completion flag and completion timestamp disagree.
    #[error("todo {0} has a completion timestamp that does not match its state")]
    CompletionMismatch(TodoId),
}
