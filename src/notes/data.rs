use serde::{Deserialize, Serialize};

use crate::data::{EntityID, Timestamp};
use crate::store::{map_optional, map_string, non_blank, Entity, TextFields};

pub type NoteID = EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteID,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_pinned: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
}

impl TextFields for Note {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_string(&mut self.title, f);
        map_string(&mut self.content, f);
        map_optional(&mut self.category, f);
    }
}

impl TextFields for NotePatch {
    fn map_text(&mut self, f: &dyn Fn(&str) -> String) {
        map_optional(&mut self.title, f);
        map_optional(&mut self.content, f);
        map_optional(&mut self.category, f);
    }
}

impl Entity for Note {
    type Draft = NewNote;
    type Patch = NotePatch;

    const NAME: &'static str = "Note";
    const COLLECTION: &'static str = "notes";

    fn from_draft(id: EntityID, now: Timestamp, draft: NewNote) -> Note {
        Note {
            id,
            title: draft.title,
            content: draft.content,
            category: non_blank(draft.category),
            is_pinned: draft.is_pinned,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> EntityID {
        self.id
    }

    fn apply(&mut self, patch: NotePatch, now: Timestamp) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if patch.category.is_some() {
            self.category = non_blank(patch.category);
        }
        if let Some(is_pinned) = patch.is_pinned {
            self.is_pinned = is_pinned;
        }
        self.updated_at = now;
    }
}
