use rusqlite::types::Value;
use rusqlite::Row;

use crate::goals::data::GoalID;
use crate::input::{check_field, check_optional_field, FieldKind, Validate, ValidationError};
use crate::store::{date_value, id_from_row, timestamp_value, TableRow};

use super::data::*;

impl TableRow for Milestone {
    const TABLE: &'static str = "milestones";
    const COLUMNS: &'static [&'static str] = &[
        "goal_id",
        "title",
        "description",
        "date",
        "completed",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Milestone> {
        Ok(Milestone {
            id: id_from_row(row, 0)?,
            goal_id: id_from_row(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            date: row.get(4)?,
            completed: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.goal_id.to_string()),
            Value::from(self.title.clone()),
            Value::from(self.description.clone()),
            date_value(&self.date),
            Value::from(self.completed),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }
}

impl Validate for NewMilestone {
    fn validate(&self) -> Result<(), ValidationError> {
        check_field("title", &self.title, FieldKind::Title, true)?;
        check_field("description", &self.description, FieldKind::Description, false)
    }
}

impl Validate for MilestonePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        check_optional_field("title", self.title.as_deref(), FieldKind::Title, true)?;
        check_optional_field(
            "description",
            self.description.as_deref(),
            FieldKind::Description,
            false,
        )
    }
}

/// Parses an optional `goalId` filter. A blank value means no filter.
pub fn goal_filter(input: Option<&str>) -> Result<Option<GoalID>, ValidationError> {
    match input.map(str::trim) {
        Some(input) if !input.is_empty() => {
            input.parse().map(Some).map_err(|_| ValidationError {
                field: "goalId",
                message: format!("Invalid goal id '{}'", input),
            })
        }
        _ => Ok(None),
    }
}

/// Milestones of one goal, earliest date first.
pub fn milestones_for_goal(milestones: Vec<Milestone>, goal_id: Option<GoalID>) -> Vec<Milestone> {
    let mut milestones: Vec<Milestone> = match goal_id {
        Some(goal_id) => milestones
            .into_iter()
            .filter(|milestone| milestone.goal_id == goal_id)
            .collect(),
        None => return milestones,
    };

    milestones.sort_by_key(|milestone| milestone.date);
    milestones
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::{new_entity_id, now};
    use crate::store::schema::test_connection;
    use crate::store::{Entity, Repository, TableRepository};

    fn milestone(goal_id: GoalID, title: &str, day: u32) -> Milestone {
        Milestone::from_draft(
            new_entity_id(),
            now(),
            NewMilestone {
                goal_id,
                title: title.to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            },
        )
    }

    #[test]
    fn filters_and_orders_by_goal() {
        let goal = new_entity_id();
        let other = new_entity_id();
        let milestones = vec![
            milestone(goal, "Late", 20),
            milestone(other, "Elsewhere", 1),
            milestone(goal, "Early", 2),
        ];

        let titles: Vec<String> = milestones_for_goal(milestones.clone(), Some(goal))
            .into_iter()
            .map(|milestone| milestone.title)
            .collect();
        assert_eq!(titles, vec!["Early", "Late"]);

        assert_eq!(milestones_for_goal(milestones.clone(), None), milestones);
    }

    #[test]
    fn parses_goal_filters() {
        let goal_id = new_entity_id();

        assert_eq!(goal_filter(None), Ok(None));
        assert_eq!(goal_filter(Some(" ")), Ok(None));
        assert_eq!(goal_filter(Some(&goal_id.to_string())), Ok(Some(goal_id)));
        assert_eq!(
            goal_filter(Some("not-a-goal")).unwrap_err().message,
            "Invalid goal id 'not-a-goal'"
        );
    }

    #[test]
    fn table_round_trip_keeps_goal_and_date() {
        let connection = test_connection();
        let repository = TableRepository::new(&connection, "user-1");
        let goal_id = new_entity_id();

        let created: Milestone = repository
            .create(NewMilestone {
                goal_id,
                title: "Sign up for the race".to_string(),
                description: "Before <b>May</b>".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            })
            .unwrap();
        assert_eq!(created.description, "Before May");

        let patch = MilestonePatch {
            completed: Some(true),
            ..MilestonePatch::default()
        };
        let updated: Milestone = repository.update(created.id, patch).unwrap().unwrap();

        assert!(updated.completed);
        assert_eq!(updated.goal_id, goal_id);
        assert_eq!(
            Repository::<Milestone>::get(&repository, created.id).unwrap(),
            Some(updated)
        );
    }
}
