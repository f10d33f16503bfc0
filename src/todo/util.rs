use rusqlite::types::Value;
use rusqlite::Row;

use std::cmp::Reverse;

use super::data::*;
use crate::input::{
    check_field, check_optional_field, parse_choice, FieldKind, Validate, ValidationError,
};
use crate::store::{date_value, enum_from_row, enum_value, id_from_row, timestamp_value, TableRow};

impl TableRow for Todo {
    const TABLE: &'static str = "todos";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "priority",
        "due_date",
        "category",
        "completed",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: id_from_row(row, 0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            priority: enum_from_row(row, 3)?,
            due_date: row.get(4)?,
            category: row.get(5)?,
            completed: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.clone()),
            Value::from(self.description.clone()),
            enum_value(&self.priority),
            self.due_date.as_ref().map_or(Value::Null, date_value),
            Value::from(self.category.clone()),
            Value::from(self.completed),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }
}

impl Validate for NewTodo {
    fn validate(&self) -> Result<(), ValidationError> {
        check_field("title", &self.title, FieldKind::Title, true)?;
        check_optional_field(
            "description",
            self.description.as_deref(),
            FieldKind::Description,
            false,
        )?;
        check_optional_field("category", self.category.as_deref(), FieldKind::Category, false)
    }
}

impl Validate for TodoPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        check_optional_field("title", self.title.as_deref(), FieldKind::Title, true)?;
        check_optional_field(
            "description",
            self.description.as_deref(),
            FieldKind::Description,
            false,
        )?;
        check_optional_field("category", self.category.as_deref(), FieldKind::Category, false)
    }
}

impl TodoQuery {
    pub fn filter(&self) -> Result<TodoFilter, ValidationError> {
        Ok(TodoFilter {
            status: match &self.status {
                Some(status) => parse_choice("status", status)?,
                None => StatusFilter::All,
            },
            priority: match &self.priority {
                Some(priority) => Some(parse_choice("priority", priority)?),
                None => None,
            },
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn order(&self) -> Result<Option<TodoOrder>, ValidationError> {
        match &self.sort {
            Some(sort) => Ok(Some(parse_choice("sort", sort)?)),
            None => Ok(None),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(todo: &Todo, filter: &TodoFilter) -> bool {
    let status_matches = match filter.status {
        StatusFilter::All => true,
        StatusFilter::Active => !todo.completed,
        StatusFilter::Completed => todo.completed,
    };

    let priority_matches = filter
        .priority
        .map_or(true, |priority| todo.priority == priority);

    let category_matches = match (&filter.category, &todo.category) {
        (Some(wanted), Some(category)) => {
            wanted.trim().to_lowercase() == category.trim().to_lowercase()
        }
        (Some(_), None) => false,
        (None, _) => true,
    };

    let search_matches = match &filter.search {
        Some(search) => {
            let search = search.trim();
            contains_ignore_case(&todo.title, search)
                || todo
                    .description
                    .as_deref()
                    .map_or(false, |description| contains_ignore_case(description, search))
        }
        None => true,
    };

    status_matches && priority_matches && category_matches && search_matches
}

pub fn filter_todos(todos: Vec<Todo>, filter: &TodoFilter) -> Vec<Todo> {
    todos
        .into_iter()
        .filter(|todo| matches(todo, filter))
        .collect()
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

pub fn sort_todos(todos: &mut [Todo], order: TodoOrder) {
    match order {
        TodoOrder::DueDate => todos.sort_by_key(|todo| (todo.due_date.is_none(), todo.due_date)),
        TodoOrder::Priority => todos.sort_by_key(|todo| priority_rank(todo.priority)),
        TodoOrder::Newest => todos.sort_by_key(|todo| Reverse(todo.created_at)),
    }
}
