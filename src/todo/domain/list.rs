//! Ordered todo list and its pure mutation operations.

use super::{Todo, TodoDomainError, TodoId, TodoIdGenerator, TodoText, timestamp};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashSet;

/// Attempts made to obtain an identifier not already in the list.
///
/// Existing identifiers are reserved with the generator first, so only
/// random collisions consume retries.
const MAX_ID_ATTEMPTS: usize = 8;

/// Insertion-ordered collection of todos with unique identifiers.
///
/// Every mutation takes `&self` and returns a new list, leaving the receiver
/// untouched. Records that a mutation does not target keep their relative
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a list from decoded records, checking every list invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`TodoDomainError`] found: invalid or untrimmed
    /// text, a completion flag that disagrees with its timestamp, or a repeated
    /// identifier.
    pub fn from_records(
        records: Vec<Todo>,
        max_text_length: usize,
    ) -> Result<Self, TodoDomainError> {
        let mut seen = HashSet::with_capacity(records.len());
        for todo in &records {
            todo.text().validate(max_text_length)?;
            todo.check_consistency()?;
            if !seen.insert(todo.id()) {
                return Err(TodoDomainError::DuplicateId(todo.id().clone()));
            }
        }
        Ok(Self { items: records })
    }

    /// Returns a list with a new active todo appended.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyInput`] or [`TodoDomainError::TooLong`]
    /// when `raw_text` fails validation, and
    /// [`TodoDomainError::DuplicateId`] when the generator keeps producing
    /// identifiers that are already taken.
    pub fn add(
        &self,
        raw_text: &str,
        max_text_length: usize,
        ids: &impl TodoIdGenerator,
        clock: &impl Clock,
    ) -> Result<Self, TodoDomainError> {
        let text = TodoText::parse(raw_text, max_text_length)?;
        let id = self.fresh_id(ids, clock)?;
        let mut items = self.items.clone();
        items.push(Todo::new(id, text, clock));
        Ok(Self { items })
    }

    /// Returns a list with the completion state of `id` flipped.
    ///
    /// An unknown identifier yields an equal list.
    #[must_use]
    pub fn toggle(&self, id: &TodoId, clock: &impl Clock) -> Self {
        let items = self
            .items
            .iter()
            .map(|todo| {
                if todo.id() == id {
                    todo.toggled(clock)
                } else {
                    todo.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Returns a list without the todo identified by `id`.
    ///
    /// An unknown identifier yields an equal list.
    #[must_use]
    pub fn delete(&self, id: &TodoId) -> Self {
        self.retained(|todo| todo.id() != id)
    }

    /// Returns a list without any completed todos.
    #[must_use]
    pub fn clear_completed(&self) -> Self {
        self.retained(|todo| !todo.is_completed())
    }

    /// Looks up a todo by identifier.
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id() == id)
    }

    /// Returns whether a todo with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over todos in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Returns the number of todos.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counts todos that are not completed.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|todo| !todo.is_completed()).count()
    }

    /// Counts completed todos.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|todo| todo.is_completed()).count()
    }

    fn retained(&self, keep: impl Fn(&Todo) -> bool) -> Self {
        let items = self.items.iter().filter(|todo| keep(todo)).cloned().collect();
        Self { items }
    }

    fn fresh_id(
        &self,
        ids: &impl TodoIdGenerator,
        clock: &impl Clock,
    ) -> Result<TodoId, TodoDomainError> {
        for todo in &self.items {
            ids.reserve(todo.id());
        }
        let now = timestamp::now_millis(clock);
        let mut candidate = ids.next_id(now);
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            candidate = ids.next_id(now);
        }
        if self.contains(&candidate) {
            return Err(TodoDomainError::DuplicateId(candidate));
        }
        Ok(candidate)
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
