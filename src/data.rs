use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use std::sync::{Arc, Mutex};

pub type DBConnection = Arc<Mutex<Connection>>;

pub type EntityID = Uuid;
pub type Timestamp = DateTime<Utc>;

pub fn new_entity_id() -> EntityID {
    Uuid::new_v4()
}

/// Truncated to the precision timestamps are stored with.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so that text ordering in SQLite matches time ordering.
pub fn timestamp_text(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Keeps an explicit `null` apart from an absent field: absent is `None`,
/// `null` is `Some(None)`. Use with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Debug)]
pub struct DeleteResult {
    pub success: bool,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> ErrorBody {
        ErrorBody {
            error: error.into(),
        }
    }
}
