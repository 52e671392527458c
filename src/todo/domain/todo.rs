//! Todo record and its completion lifecycle.

use super::{TodoDomainError, TodoId, TodoText, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single todo item.
///
/// The serialized form uses camel-case field names and omits `completedAt`
/// while the item is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    text: TodoText,
    completed: bool,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates an active todo stamped with the current clock time.
    #[must_use]
    pub fn new(id: TodoId, text: TodoText, clock: &impl Clock) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: timestamp::now_millis(clock),
            completed_at: None,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &TodoId {
        &self.id
    }

    /// Returns the text.
    #[must_use]
    pub const fn text(&self) -> &TodoText {
        &self.text
    }

    /// Returns whether the todo is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp while completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a copy with the completion state flipped.
    ///
    /// Completing stamps `completed_at` with the current clock time;
    /// reopening clears it.
    #[must_use]
    pub fn toggled(&self, clock: &impl Clock) -> Self {
        let completed = !self.completed;
        let completed_at = completed.then(|| timestamp::now_millis(clock));
        Self {
            completed,
            completed_at,
            ..self.clone()
        }
    }

    /// Verifies that the completion flag and timestamp agree.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CompletionMismatch`] when `completed_at` is
    /// set on an active todo or missing on a completed one.
    pub fn check_consistency(&self) -> Result<(), TodoDomainError> {
        if self.completed != self.completed_at.is_some() {
            return Err(TodoDomainError::CompletionMismatch(self.id.clone()));
        }
        Ok(())
    }
}
