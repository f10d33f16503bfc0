use rusqlite::types::Value;
use rusqlite::Row;

use crate::input::{check_field, check_optional_field, FieldKind, Validate, ValidationError};
use crate::store::{id_from_row, timestamp_value, TableRow};

use super::data::*;

impl TableRow for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "content",
        "category",
        "is_pinned",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Note> {
        Ok(Note {
            id: id_from_row(row, 0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            category: row.get(3)?,
            is_pinned: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.clone()),
            Value::from(self.content.clone()),
            Value::from(self.category.clone()),
            Value::from(self.is_pinned),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }
}

impl Validate for NewNote {
    fn validate(&self) -> Result<(), ValidationError> {
        check_field("title", &self.title, FieldKind::Title, true)?;
        check_field("content", &self.content, FieldKind::Content, true)?;
        check_optional_field("category", self.category.as_deref(), FieldKind::Category, false)
    }
}

impl Validate for NotePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        check_optional_field("title", self.title.as_deref(), FieldKind::Title, true)?;
        check_optional_field("content", self.content.as_deref(), FieldKind::Content, true)?;
        check_optional_field("category", self.category.as_deref(), FieldKind::Category, false)
    }
}

/// Pinned notes first, otherwise keeping the store's order.
pub fn pinned_first(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by_key(|note| !note.is_pinned);
    notes
}
