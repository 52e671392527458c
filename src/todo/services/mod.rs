//! Application services for the todo list session.

mod config;
mod controller;
mod persistence;

pub use config::{STORAGE_KEY, TodoConfig};
pub use controller::{TodoController, TodoNotice};
pub use persistence::{LoadFailure, LoadOutcome, PersistenceError, SaveFailure, TodoPersistence};
