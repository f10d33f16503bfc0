use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{EntityID, Timestamp};
use crate::store::{map_list, map_optional, non_blank, Entity, TextFields};

pub type CheckInID = EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
    Terrible,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    High,
    Medium,
    Low,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: CheckInID,
    pub date: NaiveDate,
    pub mood: Mood,
    pub energy: Energy,
    pub accomplishments: Vec<String>,
    pub challenges: Vec<String>,
    pub goals: Vec<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckIn {
    pub date: NaiveDate,
    pub mood: Mood,
    pub energy: Energy,
    #[serde(default)]
    pub accomplishments: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    pub notes: Option<String>,
}

/// List fields are replaced as a whole.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPatch {
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub energy: Option<Energy>,
    pub accomplishments: Option<Vec<String>>,
    pub challenges: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl TextFields for CheckIn {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_list(&mut self.accomplishments, f);
        map_list(&mut self.challenges, f);
        map_list(&mut self.goals, f);
        map_optional(&mut self.notes, f);
    }
}

impl TextFields for CheckInPatch {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        for list in [
            &mut self.accomplishments,
            &mut self.challenges,
            &mut self.goals,
        ]
        .into_iter()
        .flatten()
        {
            map_list(list, f);
        }
        map_optional(&mut self.notes, f);
    }
}

impl Entity for CheckIn {
    type Draft = NewCheckIn;
    type Patch = CheckInPatch;

    const NAME: &'static str = "Check-in";
    const COLLECTION: &'static str = "checkins";

    fn from_draft(id: EntityID, now: Timestamp, draft: NewCheckIn) -> CheckIn {
        CheckIn {
            id,
            date: draft.date,
            mood: draft.mood,
            energy: draft.energy,
            accomplishments: draft.accomplishments,
            challenges: draft.challenges,
            goals: draft.goals,
            notes: non_blank(draft.notes),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> EntityID {
        self.id
    }

    fn apply(&mut self, patch: CheckInPatch, now: Timestamp) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(energy) = patch.energy {
            self.energy = energy;
        }
        if let Some(accomplishments) = patch.accomplishments {
            self.accomplishments = accomplishments;
        }
        if let Some(challenges) = patch.challenges {
            self.challenges = challenges;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if patch.notes.is_some() {
            self.notes = non_blank(patch.notes);
        }
        self.updated_at = now;
    }
}
