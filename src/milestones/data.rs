use chrono::NaiveDate;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use crate::data::{EntityID, Timestamp};
use crate::goals::data::GoalID;
use crate::store::{map_optional, map_string, Entity, TextFields};

pub type MilestoneID = EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneID,
    pub goal_id: GoalID,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub goal_id: GoalID,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

#[derive(FromForm, Debug)]
pub struct MilestoneQuery {
    #[field(name = "goalId")]
    pub goal_id: Option<String>,
}

impl TextFields for Milestone {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_string(&mut self.title, f);
        map_string(&mut self.description, f);
    }
}

impl TextFields for MilestonePatch {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_optional(&mut self.title, f);
        map_optional(&mut self.description, f);
    }
}

impl Entity for Milestone {
    type Draft = NewMilestone;
    type Patch = MilestonePatch;

    const NAME: &'static str = "Milestone";
    const COLLECTION: &'static str = "milestones";

    fn from_draft(id: EntityID, now: Timestamp, draft: NewMilestone) -> Milestone {
        Milestone {
            id,
            goal_id: draft.goal_id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> EntityID {
        self.id
    }

    fn apply(&mut self, patch: MilestonePatch, now: Timestamp) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }
}
