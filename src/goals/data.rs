use serde::{Deserialize, Serialize};

use crate::data::{EntityID, Timestamp};
use crate::store::{map_optional, map_string, Entity, TextFields};

pub type GoalID = EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Career,
    Learning,
    Relationships,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Health,
        Category::Career,
        Category::Learning,
        Category::Relationships,
    ];
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFrame {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalID,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub time_frame: TimeFrame,
    pub status: GoalStatus,
    pub progress: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub time_frame: TimeFrame,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub progress: u8,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub time_frame: Option<TimeFrame>,
    pub status: Option<GoalStatus>,
    pub progress: Option<u8>,
}

/// Raw output of the AI completion service, forwarded by the client.
#[derive(Deserialize, Debug)]
pub struct SuggestionImport {
    pub completion: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category: Category,
    pub average_progress: u8,
    pub goals: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_progress: u8,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub summary: GoalSummary,
    pub by_category: Vec<CategoryProgress>,
}

impl TextFields for Goal {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_string(&mut self.title, f);
        map_string(&mut self.description, f);
    }
}

impl TextFields for GoalPatch {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_optional(&mut self.title, f);
        map_optional(&mut self.description, f);
    }
}

impl Entity for Goal {
    type Draft = NewGoal;
    type Patch = GoalPatch;

    const NAME: &'static str = "Goal";
    const COLLECTION: &'static str = "goals";

    fn from_draft(id: EntityID, now: Timestamp, draft: NewGoal) -> Goal {
        Goal {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            time_frame: draft.time_frame,
            status: draft.status,
            progress: draft.progress,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> EntityID {
        self.id
    }

    fn apply(&mut self, patch: GoalPatch, now: Timestamp) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(time_frame) = patch.time_frame {
            self.time_frame = time_frame;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        self.updated_at = now;
    }
}
