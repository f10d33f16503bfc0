use chrono::NaiveDate;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use crate::data::{nullable, EntityID, Timestamp};
use crate::store::{map_optional, map_string, non_blank, Entity, TextFields};

pub type TodoID = EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoID,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// An empty `description` or `category` clears the field, as does a `null`
/// `dueDate`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TodoOrder {
    /// Earliest due date first, undated last.
    DueDate,
    /// High priority first.
    Priority,
    Newest,
}

#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(FromForm, Debug, Default)]
pub struct TodoQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl TextFields for Todo {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_string(&mut self.title, f);
        map_optional(&mut self.description, f);
        map_optional(&mut self.category, f);
    }
}

impl TextFields for TodoPatch {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_optional(&mut self.title, f);
        map_optional(&mut self.description, f);
        map_optional(&mut self.category, f);
    }
}

impl Entity for Todo {
    type Draft = NewTodo;
    type Patch = TodoPatch;

    const NAME: &'static str = "Todo";
    const COLLECTION: &'static str = "todos";

    fn from_draft(id: EntityID, now: Timestamp, draft: NewTodo) -> Todo {
        Todo {
            id,
            title: draft.title,
            description: non_blank(draft.description),
            priority: draft.priority,
            due_date: draft.due_date,
            category: non_blank(draft.category),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> EntityID {
        self.id
    }

    fn apply(&mut self, patch: TodoPatch, now: Timestamp) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.description.is_some() {
            self.description = non_blank(patch.description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if patch.category.is_some() {
            self.category = non_blank(patch.category);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }
}
