//! In-memory todo collection.
//!
//! `TodoStore` is plain data with `&self`/`&mut self` methods; callers that
//! share it across requests wrap it in a lock (see [`crate::Db`]), so every
//! mutation below runs as one uninterrupted read-modify-write.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::filter::TodoFilter;
use crate::model::{Category, NewTodo, Priority, Todo, TodoPatch};

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }
}

impl TodoStore {
    /// A store holding the two demonstration records, ids 1 and 2.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.create(NewTodo {
            title: "Learn Docker and Kubernetes".to_string(),
            description: "Study containerization and orchestration basics".to_string(),
            priority: Priority::High,
            category: Category::Education,
        });
        store.create(NewTodo {
            title: "Implement Blue/Green Deploy".to_string(),
            description: "Set up advanced deployment strategies".to_string(),
            priority: Priority::Medium,
            category: Category::Work,
        });
        store
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn list(&self, filter: &TodoFilter) -> Vec<Todo> {
        filter.apply(&self.todos)
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Appends a new todo. Ids come from a counter that is never rewound,
    /// so ids of deleted todos are not handed out again.
    pub fn create(&mut self, new_todo: NewTodo) -> Todo {
        let todo = new_todo.into_todo(self.next_id, Utc::now());
        self.next_id += 1;
        self.todos.push(todo.clone());
        todo
    }

    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|todo| todo.id == id)?;
        patch.apply(todo, Utc::now());
        Some(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id == id)?;
        Some(self.todos.remove(index))
    }

    pub fn stats(&self) -> TodoStats {
        let mut stats = TodoStats {
            total: self.todos.len(),
            ..Default::default()
        };
        for todo in &self.todos {
            if todo.completed {
                stats.completed += 1;
            }
            match todo.priority {
                Priority::High => stats.by_priority.high += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::Low => stats.by_priority.low += 1,
            }
            match todo.category {
                Category::Personal => stats.by_category.personal += 1,
                Category::Work => stats.by_category.work += 1,
                Category::Education => stats.by_category.education += 1,
                Category::Health => stats.by_category.health += 1,
            }
        }
        stats.pending = stats.total - stats.completed;
        stats
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub by_priority: PriorityCounts,
    pub by_category: CategoryCounts,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub personal: usize,
    pub work: usize,
    pub education: usize,
    pub health: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::default(),
            category: Category::default(),
        }
    }

    #[test]
    fn seeded_store_has_two_records_and_continues_at_three() {
        let mut store = TodoStore::seeded();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().priority, Priority::High);
        assert_eq!(store.get(2).unwrap().category, Category::Work);
        assert_eq!(store.create(new_todo("third")).id, 3);
    }

    #[test]
    fn ids_strictly_increase_and_are_not_reused() {
        let mut store = TodoStore::default();
        let a = store.create(new_todo("a"));
        let b = store.create(new_todo("b"));
        store.delete(b.id).unwrap();
        let c = store.create(new_todo("c"));
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn created_todo_starts_incomplete_with_equal_timestamps() {
        let mut store = TodoStore::default();
        let todo = store.create(new_todo("fresh"));
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_eq!(store.get(todo.id), Some(&todo));
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let mut store = TodoStore::seeded();
        assert!(store.update(99, TodoPatch::default()).is_none());
    }

    #[test]
    fn update_refreshes_updated_at() {
        let mut store = TodoStore::seeded();
        let before = store.get(1).unwrap().clone();
        let after = store
            .update(
                1,
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(after.completed);
        assert_eq!(after.title, before.title);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn delete_preserves_order_of_remaining() {
        let mut store = TodoStore::default();
        for title in ["a", "b", "c"] {
            store.create(new_todo(title));
        }
        let removed = store.delete(2).unwrap();
        assert_eq!(removed.title, "b");
        let remaining: Vec<u64> = store.list(&TodoFilter::default()).iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![1, 3]);
        assert!(store.delete(2).is_none());
    }

    #[test]
    fn stats_totals_add_up() {
        let mut store = TodoStore::seeded();
        store.update(
            2,
            TodoPatch {
                completed: Some(true),
                ..Default::default()
            },
        );
        store.create(NewTodo {
            priority: Priority::Low,
            category: Category::Health,
            ..new_todo("walk")
        });

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(
            stats.by_priority,
            PriorityCounts {
                high: 1,
                medium: 1,
                low: 1
            }
        );
        assert_eq!(
            stats.by_category,
            CategoryCounts {
                personal: 0,
                work: 1,
                education: 1,
                health: 1
            }
        );
    }

    #[test]
    fn stats_of_empty_store_are_zero() {
        assert_eq!(TodoStore::default().stats(), TodoStats::default());
    }
}
