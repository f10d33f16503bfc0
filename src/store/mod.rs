use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::{EntityID, Timestamp};
use crate::input::{sanitize_for_storage, unescape_for_display};
use crate::internal_error::InternalResult;

mod local;
pub mod schema;
mod table;

pub use local::{KeyValueStore, LocalRepository, MemoryStore};
pub use table::{
    date_value, enum_from_row, enum_value, id_from_row, json_from_row, json_value,
    timestamp_value, TableRepository, TableRow,
};

/// Visits every free-text field, including each element of text lists.
pub trait TextFields {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String);
}

pub fn map_string(value: &mut String, f: &dyn Fn(&str) -> String) {
    *value = f(value.as_str());
}

pub fn map_optional(value: &mut Option<String>, f: &dyn Fn(&str) -> String) {
    if let Some(value) = value {
        map_string(value, f);
    }
}

pub fn map_list(values: &mut [String], f: &dyn Fn(&str) -> String) {
    for value in values.iter_mut() {
        map_string(value, f);
    }
}

pub fn sanitize_data<T: TextFields>(mut data: T) -> T {
    data.map_text(&sanitize_for_storage);
    data
}

pub fn unescape_data<T: TextFields>(mut data: T) -> T {
    data.map_text(&unescape_for_display);
    data
}

/// Blank optional text is stored as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A persisted record kind.
pub trait Entity: TextFields + Serialize + DeserializeOwned + Clone {
    /// Fields supplied on create.
    type Draft;
    /// Fields that may change after create.
    type Patch: TextFields;

    const NAME: &'static str;
    const COLLECTION: &'static str;

    fn from_draft(id: EntityID, now: Timestamp, draft: Self::Draft) -> Self;
    fn id(&self) -> EntityID;
    /// Merges the patch and refreshes `updated_at`.
    fn apply(&mut self, patch: Self::Patch, now: Timestamp);
}

/// CRUD access to one collection. Records come back unescaped.
pub trait Repository<E: Entity> {
    fn list(&self) -> InternalResult<Vec<E>>;
    fn get(&self, id: EntityID) -> InternalResult<Option<E>>;
    fn create(&self, draft: E::Draft) -> InternalResult<E>;
    /// `Ok(None)` means the id was unknown and nothing changed.
    fn update(&self, id: EntityID, patch: E::Patch) -> InternalResult<Option<E>>;
    fn delete(&self, id: EntityID) -> InternalResult<bool>;
}
