//! Shared world state for todo list BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use toist::todo::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{SequentialIdGenerator, TodoId},
    services::{TodoConfig, TodoController, TodoNotice, TodoPersistence},
};

/// Controller type used by the BDD world.
pub type TestTodoController =
    TodoController<InMemoryKeyValueStore, DefaultClock, SequentialIdGenerator>;

/// Scenario world for todo list behaviour tests.
pub struct TodoListWorld {
    pub store: InMemoryKeyValueStore,
    pub controller: TestTodoController,
    pub last_add_result: Option<Result<(), TodoNotice>>,
    pub last_deleted: Option<TodoId>,
}

impl TodoListWorld {
    /// Creates a world whose controller is still loading.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryKeyValueStore::new(),
            controller: TodoController::new(
                Arc::new(DefaultClock),
                Arc::new(SequentialIdGenerator::new()),
                TodoConfig::default(),
            ),
            last_add_result: None,
            last_deleted: None,
        }
    }

    /// Attaches the world's store to the controller.
    ///
    /// # Errors
    ///
    /// Returns an error if storage was already attached.
    pub fn start_session(&mut self) -> Result<(), eyre::Report> {
        let persistence =
            TodoPersistence::new(Arc::new(self.store.clone()), self.controller.config());
        run_async(self.controller.attach(persistence))
            .map_err(|notice| eyre::eyre!("attach failed: {notice}"))
    }

    /// Finds the identifier of the todo with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if no todo has that text.
    pub fn id_of(&self, text: &str) -> Result<TodoId, eyre::Report> {
        self.controller
            .list()
            .iter()
            .find(|todo| todo.text().as_str() == text)
            .map(|todo| todo.id().clone())
            .ok_or_else(|| eyre::eyre!("no todo with text {text:?}"))
    }
}

impl Default for TodoListWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoListWorld {
    TodoListWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
