use chrono::{DateTime, Local};
use ratatui::style::Color;

/// A reminder as returned by the host store. The host owns it; we only hold
/// the snapshot until the next fetch replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
    pub due_date: Option<DateTime<Local>>,
    pub calendar_name: String,
    pub calendar_color: Color,
    pub priority: u8,
}

impl ReminderRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_completed: false,
            due_date: None,
            calendar_name: "Reminders".to_string(),
            calendar_color: Color::White,
            priority: 0,
        }
    }

    pub fn due(mut self, due: DateTime<Local>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn priority_label(&self) -> Option<&'static str> {
        match self.priority {
            1..=4 => Some("High"),
            5 => Some("Medium"),
            6..=9 => Some("Low"),
            _ => None,
        }
    }
}
