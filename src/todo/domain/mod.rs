//! Domain model for the todo list.
//!
//! Records, validated scalars, and the pure list operations live here. The
//! domain reads time only through an injected [`mockable::Clock`] and obtains
//! identifiers only through a [`TodoIdGenerator`], keeping storage and
//! presentation concerns outside the boundary.

mod error;
mod ids;
mod list;
mod text;
pub mod timestamp;
mod todo;

pub use error::TodoDomainError;
pub use ids::{SequentialIdGenerator, TimestampIdGenerator, TodoId, TodoIdGenerator};
pub use list::TodoList;
pub use text::{DEFAULT_MAX_TEXT_LENGTH, TodoText};
pub use todo::Todo;
