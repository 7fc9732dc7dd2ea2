use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Repeat every `interval` units of `frequency`; at least 1.
    pub interval: u32,
}

impl RecurrenceRule {
    pub fn every(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval: interval.max(1),
        }
    }
}

/// Something to do. Identity is fixed at creation; completion and notes change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub recurrence: Option<RecurrenceRule>,
    pub due_date: Option<DateTime<Local>>,
    pub notes: Option<String>,
}

impl Activity {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            recurrence: None,
            due_date: None,
            notes: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
