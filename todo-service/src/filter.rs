//! Query-string filters for `GET /api/todos`.

use serde::Serialize;

use crate::model::Todo;

/// Filters are independent and combined with AND. Empty `priority`,
/// `category` and `search` values are ignored; `completed` counts as soon as
/// it is present, and anything other than `"true"` means `false`.
///
/// The struct is echoed back in the list response as `filters`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl TodoFilter {
    /// Returns the matching todos in their original order.
    pub fn apply(&self, todos: &[Todo]) -> Vec<Todo> {
        let mut matched: Vec<Todo> = todos.to_vec();

        if let Some(completed) = self.completed.as_deref() {
            let completed = completed == "true";
            matched.retain(|todo| todo.completed == completed);
        }
        if let Some(priority) = non_empty(&self.priority) {
            matched.retain(|todo| todo.priority.as_str() == priority);
        }
        if let Some(category) = non_empty(&self.category) {
            matched.retain(|todo| todo.category.as_str() == category);
        }
        if let Some(search) = non_empty(&self.search) {
            let needle = search.to_lowercase();
            matched.retain(|todo| {
                todo.title.to_lowercase().contains(&needle)
                    || todo.description.to_lowercase().contains(&needle)
            });
        }

        matched
    }
}

/// Builds a filter from raw query pairs. A repeated parameter keeps its
/// first value; unknown parameters are dropped.
impl FromIterator<(String, String)> for TodoFilter {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut filter = TodoFilter::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "completed" => &mut filter.completed,
                "priority" => &mut filter.priority,
                "category" => &mut filter.category,
                "search" => &mut filter.search,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        filter
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
