//! Todo records and the request payloads that create or change them.
//!
//! Payloads keep `priority` and `category` as raw strings so that an unknown
//! value produces the service's own validation message instead of a generic
//! deserialization failure. `validate` turns a payload into a typed value
//! that can no longer be invalid.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::TodoError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TodoError::InvalidPriority),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Education,
    Health,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Education => "education",
            Category::Health => "health",
        }
    }
}

impl FromStr for Category {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            "education" => Ok(Category::Education),
            "health" => Ok(Category::Health),
            _ => Err(TodoError::InvalidCategory),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Timestamps go out as `2024-05-01T12:00:00.000Z`.
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Body of `POST /api/todos`. Unknown fields, including `id` and
/// `completed`, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

/// Body of `PUT /api/todos/{id}`. Every field is optional; only the ones
/// present are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

/// A validated create request with defaults already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
}

/// A validated partial update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

impl CreateTodo {
    pub fn validate(self) -> Result<NewTodo, TodoError> {
        let title = non_blank_title(self.title.as_deref().unwrap_or_default())?;
        let priority = parse_optional::<Priority>(self.priority.as_deref())?.unwrap_or_default();
        let category = parse_optional::<Category>(self.category.as_deref())?.unwrap_or_default();
        Ok(NewTodo {
            title,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            priority,
            category,
        })
    }
}

impl UpdateTodo {
    pub fn validate(self) -> Result<TodoPatch, TodoError> {
        let title = self.title.as_deref().map(non_blank_title).transpose()?;
        let priority = parse_optional::<Priority>(self.priority.as_deref())?;
        let category = parse_optional::<Category>(self.category.as_deref())?;
        Ok(TodoPatch {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            completed: self.completed,
            priority,
            category,
        })
    }
}

impl NewTodo {
    pub fn into_todo(self, id: u64, now: DateTime<Utc>) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: false,
            priority: self.priority,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TodoPatch {
    /// Merges the patch into `todo` and refreshes `updated_at`, which never
    /// moves backwards even if the wall clock does.
    pub fn apply(self, todo: &mut Todo, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(category) = self.category {
            todo.category = category;
        }
        todo.updated_at = now.max(todo.updated_at);
    }
}

fn non_blank_title(raw: &str) -> Result<String, TodoError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TodoError::TitleRequired);
    }
    Ok(title.to_string())
}

fn parse_optional<T: FromStr<Err = TodoError>>(raw: Option<&str>) -> Result<Option<T>, TodoError> {
    raw.map(str::parse).transpose()
}
