//! Plain-text rendering of a todo list.

use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde::Serialize;

use super::format_relative;
use crate::todo::{
    domain::{Todo, TodoList},
    services::TodoNotice,
};

const LIST_TEMPLATE: &str = "\
{% if notice %}! {{ notice }}
{% endif %}\
{% for item in items %}\
{{ item.marker }} {{ item.text }}  ({{ item.id }}, added {{ item.added }}\
{% if item.done %}, done {{ item.done }}{% endif %})
{% else %}No tasks yet.
{% endfor %}\
{{ active }} active, {{ completed }} completed";

#[derive(Debug, Serialize)]
struct ItemContext<'a> {
    marker: &'static str,
    text: &'a str,
    id: &'a str,
    added: String,
    done: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListContext<'a> {
    notice: Option<String>,
    items: Vec<ItemContext<'a>>,
    active: usize,
    completed: usize,
}

/// Text view over a todo list.
///
/// Todos appear in insertion order, followed by the active and completed
/// counts. The current notice, when present, is shown first.
#[derive(Debug, Clone, Copy)]
pub struct TodoListView<'a> {
    list: &'a TodoList,
    notice: Option<&'a TodoNotice>,
    now: DateTime<Utc>,
}

impl<'a> TodoListView<'a> {
    /// Creates a view of `list` with relative times measured from `now`.
    #[must_use]
    pub const fn new(list: &'a TodoList, now: DateTime<Utc>) -> Self {
        Self {
            list,
            notice: None,
            now,
        }
    }

    /// Shows `notice` above the list.
    #[must_use]
    pub const fn with_notice(mut self, notice: Option<&'a TodoNotice>) -> Self {
        self.notice = notice;
        self
    }

    /// Renders the view.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the template fails to render.
    pub fn render(&self) -> Result<String, minijinja::Error> {
        let context = ListContext {
            notice: self.notice.map(ToString::to_string),
            items: self.list.iter().map(|todo| self.item(todo)).collect(),
            active: self.list.active_count(),
            completed: self.list.completed_count(),
        };
        Environment::new().render_str(LIST_TEMPLATE, context)
    }

    fn item<'t>(&self, todo: &'t Todo) -> ItemContext<'t> {
        ItemContext {
            marker: if todo.is_completed() { "[x]" } else { "[ ]" },
            text: todo.text().as_str(),
            id: todo.id().as_str(),
            added: format_relative(todo.created_at(), self.now),
            done: todo
                .completed_at()
                .map(|completed_at| format_relative(completed_at, self.now)),
        }
    }
}
