use rusqlite::types::Value;
use rusqlite::Row;

use crate::input::{check_field, check_optional_field, FieldKind, Validate, ValidationError};
use crate::store::{enum_from_row, enum_value, id_from_row, timestamp_value, TableRow};

use super::data::*;

pub const MAX_PROGRESS: u8 = 100;

impl TableRow for Goal {
    const TABLE: &'static str = "goals";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "category",
        "time_frame",
        "status",
        "progress",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Goal> {
        Ok(Goal {
            id: id_from_row(row, 0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            category: enum_from_row(row, 3)?,
            time_frame: enum_from_row(row, 4)?,
            status: enum_from_row(row, 5)?,
            progress: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.clone()),
            Value::from(self.description.clone()),
            enum_value(&self.category),
            enum_value(&self.time_frame),
            enum_value(&self.status),
            Value::from(self.progress),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }
}

fn check_progress(progress: u8) -> Result<(), ValidationError> {
    if progress > MAX_PROGRESS {
        return Err(ValidationError {
            field: "progress",
            message: format!("Progress must be between 0 and {}", MAX_PROGRESS),
        });
    }

    Ok(())
}

impl Validate for NewGoal {
    fn validate(&self) -> Result<(), ValidationError> {
        check_field("title", &self.title, FieldKind::Title, true)?;
        check_field("description", &self.description, FieldKind::Description, false)?;
        check_progress(self.progress)
    }
}

impl Validate for GoalPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        check_optional_field("title", self.title.as_deref(), FieldKind::Title, true)?;
        check_optional_field(
            "description",
            self.description.as_deref(),
            FieldKind::Description,
            false,
        )?;
        match self.progress {
            Some(progress) => check_progress(progress),
            None => Ok(()),
        }
    }
}

fn rounded_average(total: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }

    (total as f64 / count as f64).round() as u8
}

/// Average progress per category, skipping categories without goals.
pub fn progress_by_category(goals: &[Goal]) -> Vec<CategoryProgress> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let progress: Vec<u64> = goals
                .iter()
                .filter(|goal| goal.category == *category)
                .map(|goal| goal.progress as u64)
                .collect();

            if progress.is_empty() {
                return None;
            }

            Some(CategoryProgress {
                category: *category,
                average_progress: rounded_average(progress.iter().sum(), progress.len()),
                goals: progress.len(),
            })
        })
        .collect()
}

pub fn goal_summary(goals: &[Goal]) -> GoalSummary {
    let count_status = |status: GoalStatus| goals.iter().filter(|goal| goal.status == status).count();

    GoalSummary {
        total: goals.len(),
        completed: count_status(GoalStatus::Completed),
        in_progress: count_status(GoalStatus::InProgress),
        average_progress: rounded_average(
            goals.iter().map(|goal| goal.progress as u64).sum(),
            goals.len(),
        ),
    }
}
