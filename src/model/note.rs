use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form note. `related_activities` only references activities by id;
/// removing an activity leaves the note untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Local>,
    pub related_activities: Vec<Uuid>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at,
            related_activities: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Adds a reference once; repeated links are ignored.
    pub fn link_activity(&mut self, activity: Uuid) {
        if !self.related_activities.contains(&activity) {
            self.related_activities.push(activity);
        }
    }

    pub fn unlink_activity(&mut self, activity: Uuid) {
        self.related_activities.retain(|id| *id != activity);
    }
}
