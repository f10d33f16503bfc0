use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;

use crate::input::{
    check_list, check_optional_field, parse_calendar_date, validate_and_sanitize_input, FieldKind,
    Validate, ValidationError,
};
use crate::store::{
    date_value, enum_from_row, enum_value, id_from_row, json_from_row, json_value,
    timestamp_value, TableRow,
};

use super::data::*;

impl TableRow for CheckIn {
    const TABLE: &'static str = "checkins";
    const COLUMNS: &'static [&'static str] = &[
        "date",
        "mood",
        "energy",
        "accomplishments",
        "challenges",
        "goals",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<CheckIn> {
        Ok(CheckIn {
            id: id_from_row(row, 0)?,
            date: row.get(1)?,
            mood: enum_from_row(row, 2)?,
            energy: enum_from_row(row, 3)?,
            accomplishments: json_from_row(row, 4)?,
            challenges: json_from_row(row, 5)?,
            goals: json_from_row(row, 6)?,
            notes: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            date_value(&self.date),
            enum_value(&self.mood),
            enum_value(&self.energy),
            json_value(&self.accomplishments),
            json_value(&self.challenges),
            json_value(&self.goals),
            Value::from(self.notes.clone()),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }
}

impl Validate for NewCheckIn {
    fn validate(&self) -> Result<(), ValidationError> {
        check_list("accomplishments", &self.accomplishments, FieldKind::Description)?;
        check_list("challenges", &self.challenges, FieldKind::Description)?;
        check_list("goals", &self.goals, FieldKind::Description)?;
        check_optional_field("notes", self.notes.as_deref(), FieldKind::Description, false)
    }
}

impl Validate for CheckInPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, list) in [
            ("accomplishments", &self.accomplishments),
            ("challenges", &self.challenges),
            ("goals", &self.goals),
        ] {
            if let Some(list) = list {
                check_list(field, list, FieldKind::Description)?;
            }
        }
        check_optional_field("notes", self.notes.as_deref(), FieldKind::Description, false)
    }
}

/// Parses an optional `date` filter typed by the user.
pub fn date_filter(input: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let input = match input {
        Some(input) => input,
        None => return Ok(None),
    };

    let check = validate_and_sanitize_input(input, FieldKind::Date, false);
    if let Some(message) = check.error {
        return Err(ValidationError {
            field: "date",
            message,
        });
    }

    Ok(parse_calendar_date(&check.sanitized_value))
}
