use chrono::NaiveDate;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{sanitize_data, unescape_data, Entity, Repository};
use crate::data::{new_entity_id, now, timestamp_text, EntityID, Timestamp};
use crate::internal_error::{InternalError, InternalResult};

/// Row mapping for an entity stored in its own table.
///
/// Every table has `id` and `user_id` columns followed by `COLUMNS`.
/// `from_row` reads `id` at index 0 and `COLUMNS` from index 1, and
/// `to_values` yields values in `COLUMNS` order.
pub trait TableRow: Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row) -> rusqlite::Result<Self>;
    fn to_values(&self) -> Vec<Value>;
}

fn conversion_failure(
    index: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
}

pub fn id_from_row(row: &Row, index: usize) -> rusqlite::Result<EntityID> {
    let text = row.get::<usize, String>(index)?;
    Uuid::parse_str(&text).map_err(|e| conversion_failure(index, e))
}

pub fn enum_value<T: Serialize>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(text)) => Value::Text(text),
        _ => Value::Null,
    }
}

pub fn enum_from_row<T: DeserializeOwned>(row: &Row, index: usize) -> rusqlite::Result<T> {
    let text = row.get::<usize, String>(index)?;
    serde_json::from_value(serde_json::Value::String(text)).map_err(|e| conversion_failure(index, e))
}

pub fn json_value<T: Serialize>(value: &T) -> Value {
    match serde_json::to_string(value) {
        Ok(json) => Value::Text(json),
        Err(_) => Value::Null,
    }
}

pub fn json_from_row<T: DeserializeOwned>(row: &Row, index: usize) -> rusqlite::Result<T> {
    let json = row.get::<usize, String>(index)?;
    serde_json::from_str(&json).map_err(|e| conversion_failure(index, e))
}

pub fn date_value(date: &NaiveDate) -> Value {
    Value::Text(date.format("%Y-%m-%d").to_string())
}

pub fn timestamp_value(timestamp: &Timestamp) -> Value {
    Value::Text(timestamp_text(timestamp))
}

/// Table access scoped to the rows of one owner.
pub struct TableRepository<'a> {
    connection: &'a Connection,
    owner: &'a str,
}

impl<'a> TableRepository<'a> {
    pub fn new(connection: &'a Connection, owner: &'a str) -> TableRepository<'a> {
        TableRepository { connection, owner }
    }

    fn fetch<E: TableRow>(&self, id: EntityID) -> InternalResult<Option<E>> {
        let mut statement = self.connection.prepare(&format!(
            "SELECT id, {} FROM {} WHERE user_id = (?1) AND id = (?2)",
            E::COLUMNS.join(", "),
            E::TABLE
        ))?;

        let record = statement
            .query_row(params![self.owner, id.to_string()], |row| E::from_row(row))
            .optional()?;

        Ok(record)
    }

    fn insert<E: TableRow>(&self, record: &E) -> InternalResult<()> {
        let placeholders = (3..E::COLUMNS.len() + 3)
            .map(|num| format!("?{}", num))
            .collect::<Vec<String>>()
            .join(", ");

        let mut values = vec![
            Value::Text(record.id().to_string()),
            Value::Text(self.owner.to_string()),
        ];
        values.extend(record.to_values());

        self.connection.execute(
            &format!(
                "INSERT INTO {} (id, user_id, {}) VALUES (?1, ?2, {})",
                E::TABLE,
                E::COLUMNS.join(", "),
                placeholders
            ),
            params_from_iter(values),
        )?;

        Ok(())
    }

    fn overwrite<E: TableRow>(&self, record: &E) -> InternalResult<()> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(num, column)| format!("{} = ?{}", column, num + 3))
            .collect::<Vec<String>>()
            .join(", ");

        let mut values = vec![
            Value::Text(record.id().to_string()),
            Value::Text(self.owner.to_string()),
        ];
        values.extend(record.to_values());

        self.connection.execute(
            &format!(
                "UPDATE {} SET {} WHERE id = (?1) AND user_id = (?2)",
                E::TABLE,
                assignments
            ),
            params_from_iter(values),
        )?;

        Ok(())
    }
}

impl<'a, E: TableRow> Repository<E> for TableRepository<'a> {
    fn list(&self) -> InternalResult<Vec<E>> {
        let mut statement = self.connection.prepare(&format!(
            "SELECT id, {} FROM {} WHERE user_id = (?1) ORDER BY created_at DESC, rowid DESC",
            E::COLUMNS.join(", "),
            E::TABLE
        ))?;

        let rows = statement.query_map(params![self.owner], |row| E::from_row(row))?;

        let mut records = vec![];
        for row_result in rows {
            records.push(unescape_data(row_result?));
        }

        Ok(records)
    }

    fn get(&self, id: EntityID) -> InternalResult<Option<E>> {
        Ok(self.fetch::<E>(id)?.map(unescape_data))
    }

    fn create(&self, draft: E::Draft) -> InternalResult<E> {
        let record = sanitize_data(E::from_draft(new_entity_id(), now(), draft));
        self.insert(&record)?;

        Ok(unescape_data(record))
    }

    fn update(&self, id: EntityID, patch: E::Patch) -> InternalResult<Option<E>> {
        let mut record = self
            .fetch::<E>(id)?
            .ok_or(InternalError::NotFound(E::NAME))?;

        record.apply(sanitize_data(patch), now());
        self.overwrite(&record)?;

        Ok(Some(unescape_data(record)))
    }

    fn delete(&self, id: EntityID) -> InternalResult<bool> {
        self.connection.execute(
            &format!("DELETE FROM {} WHERE id = (?1) AND user_id = (?2)", E::TABLE),
            params![id.to_string(), self.owner],
        )?;

        Ok(true)
    }
}
