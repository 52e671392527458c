//! Presentation helpers for the todo list.

mod relative_time;
mod render;

pub use relative_time::format_relative;
pub use render::TodoListView;
