//! Controller owning the todo list for one session.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::{PersistenceError, TodoConfig, TodoPersistence};
use crate::todo::{
    domain::{TodoDomainError, TodoId, TodoIdGenerator, TodoList},
    ports::KeyValueStore,
};

/// User-facing message describing the last failed operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoNotice {
    /// The submitted text was empty after trimming.
    #[error("Please enter a task.")]
    EmptyInput,
    /// The submitted text exceeded the length limit.
    #[error("Tasks can be at most {max} characters long.")]
    TooLong {
        /// Configured maximum length in characters.
        max: usize,
    },
    /// No unused identifier could be generated for a new task.
    #[error("Could not create a unique task identifier, please try again.")]
    IdConflict,
    /// A task record broke a list rule, such as a completion time on an
    /// open task.
    #[error("A task record is inconsistent and was not applied.")]
    InvalidRecord,
    /// Stored tasks could not be read; the session started empty.
    #[error("Saved tasks could not be loaded, starting fresh.")]
    LoadFailed,
    /// The latest change was not saved; it stays available in this session.
    #[error("Changes could not be saved and will be lost when this session ends.")]
    SaveFailed,
    /// Storage has not been attached yet.
    #[error("Tasks are still loading.")]
    NotReady,
    /// Storage was already attached to this controller.
    #[error("Storage is already attached.")]
    AlreadyAttached,
}

impl From<TodoDomainError> for TodoNotice {
    fn from(err: TodoDomainError) -> Self {
        match err {
            TodoDomainError::EmptyInput => Self::EmptyInput,
            TodoDomainError::TooLong { max, .. } => Self::TooLong { max },
            TodoDomainError::DuplicateId(_) => Self::IdConflict,
            TodoDomainError::Untrimmed | TodoDomainError::CompletionMismatch(_) => {
                Self::InvalidRecord
            }
        }
    }
}

impl From<&PersistenceError> for TodoNotice {
    fn from(err: &PersistenceError) -> Self {
        match err {
            PersistenceError::LoadFailed(_) => Self::LoadFailed,
            PersistenceError::SaveFailed(_) => Self::SaveFailed,
        }
    }
}

/// Owns the todo list and routes user actions to it.
///
/// A controller starts in the loading phase with an empty list and rejects
/// every mutation with [`TodoNotice::NotReady`]. [`Self::attach`] performs the
/// one-time load and enables mutations. After that, each mutation that
/// changes the list triggers exactly one save of the whole list.
pub struct TodoController<S, C, G>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
    G: TodoIdGenerator,
{
    list: TodoList,
    persistence: Option<TodoPersistence<S>>,
    notice: Option<TodoNotice>,
    clock: Arc<C>,
    ids: Arc<G>,
    config: TodoConfig,
}

impl<S, C, G> TodoController<S, C, G>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
    G: TodoIdGenerator,
{
    /// Creates a controller in the loading phase.
    #[must_use]
    pub const fn new(clock: Arc<C>, ids: Arc<G>, config: TodoConfig) -> Self {
        Self {
            list: TodoList::new(),
            persistence: None,
            notice: None,
            clock,
            ids,
            config,
        }
    }

    /// Loads the stored list and leaves the loading phase.
    ///
    /// A failed load is not an error here: the controller starts with an
    /// empty list and records [`TodoNotice::LoadFailed`]. Nothing is written
    /// while attaching.
    ///
    /// # Errors
    ///
    /// Returns [`TodoNotice::AlreadyAttached`] when storage was attached
    /// before; the existing list is kept.
    pub async fn attach(&mut self, persistence: TodoPersistence<S>) -> Result<(), TodoNotice> {
        if self.persistence.is_some() {
            return Err(TodoNotice::AlreadyAttached);
        }
        let outcome = persistence.load().await;
        self.list = outcome.list;
        self.notice = outcome.error.as_ref().map(TodoNotice::from);
        self.persistence = Some(persistence);
        Ok(())
    }

    /// Appends a new todo built from `raw_text`.
    ///
    /// The new todo is the last entry of [`Self::list`]. A failed save keeps
    /// the todo in memory and records [`TodoNotice::SaveFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`TodoNotice::NotReady`] before [`Self::attach`], or the
    /// validation notice (also recorded as the current notice) when the text
    /// is rejected.
    pub async fn add(&mut self, raw_text: &str) -> Result<(), TodoNotice> {
        self.ensure_ready()?;
        let added = self.list.add(
            raw_text,
            self.config.max_text_length,
            &*self.ids,
            &*self.clock,
        );
        match added {
            Ok(next) => {
                self.commit(next).await;
                Ok(())
            }
            Err(err) => {
                let notice = TodoNotice::from(err);
                self.notice = Some(notice.clone());
                Err(notice)
            }
        }
    }

    /// Flips the completion state of `id`.
    ///
    /// Returns whether the list changed; unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TodoNotice::NotReady`] before [`Self::attach`].
    pub async fn toggle(&mut self, id: &TodoId) -> Result<bool, TodoNotice> {
        self.ensure_ready()?;
        let next = self.list.toggle(id, &*self.clock);
        Ok(self.commit(next).await)
    }

    /// Removes the todo identified by `id`.
    ///
    /// Returns whether the list changed; unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TodoNotice::NotReady`] before [`Self::attach`].
    pub async fn delete(&mut self, id: &TodoId) -> Result<bool, TodoNotice> {
        self.ensure_ready()?;
        let next = self.list.delete(id);
        Ok(self.commit(next).await)
    }

    /// Removes every completed todo.
    ///
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoNotice::NotReady`] before [`Self::attach`].
    pub async fn clear_completed(&mut self) -> Result<bool, TodoNotice> {
        self.ensure_ready()?;
        let next = self.list.clear_completed();
        Ok(self.commit(next).await)
    }

    /// Returns the current list.
    #[must_use]
    pub const fn list(&self) -> &TodoList {
        &self.list
    }

    /// Returns the notice from the last failed operation, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&TodoNotice> {
        self.notice.as_ref()
    }

    /// Returns whether storage has not been attached yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.persistence.is_none()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TodoConfig {
        &self.config
    }

    /// Counts todos that are not completed.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.list.active_count()
    }

    /// Counts completed todos.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.list.completed_count()
    }

    const fn ensure_ready(&self) -> Result<(), TodoNotice> {
        if self.persistence.is_none() {
            return Err(TodoNotice::NotReady);
        }
        Ok(())
    }

    /// Adopts `next` and saves it when it differs from the current list.
    async fn commit(&mut self, next: TodoList) -> bool {
        if next == self.list {
            return false;
        }
        self.list = next;
        debug!(count = self.list.len(), "todo list changed");
        self.notice = match self.persist().await {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "keeping unsaved todo list in memory");
                Some(TodoNotice::from(&err))
            }
        };
        true
    }

    async fn persist(&self) -> Result<(), PersistenceError> {
        match &self.persistence {
            Some(persistence) => persistence.save(&self.list).await,
            None => Ok(()),
        }
    }
}
