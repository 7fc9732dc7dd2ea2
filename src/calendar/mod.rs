//! Boundary to the host's personal-data store (reminders and calendar events).
//!
//! The sync layer only ever talks to a [`ReminderPlatform`]; the binary picks the
//! concrete backend once at startup.

pub mod calendar;
pub mod event;
#[cfg(target_os = "macos")]
pub mod eventkit;
pub mod memory;
pub mod reminder;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use thiserror::Error;

pub use calendar::CalendarInfo;
pub use event::CalendarEvent;
#[cfg(target_os = "macos")]
pub use eventkit::EventKitPlatform;
pub use memory::InMemoryPlatform;
pub use reminder::ReminderRecord;

/// Independent data scopes the host asks the user to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessScope {
    Reminders,
    Events,
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessScope::Reminders => f.write_str("reminders"),
            AccessScope::Events => f.write_str("events"),
        }
    }
}

/// Error object reported by the host store. Opaque apart from a message and
/// an optional domain code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PlatformError {
    pub message: String,
    pub code: Option<i64>,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
        }
    }
}

/// Predicate for an incomplete-reminder query over a due-date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderQuery {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    /// `None` searches every calendar the host exposes.
    pub calendars: Option<Vec<String>>,
    pub incomplete_only: bool,
}

impl ReminderQuery {
    pub fn incomplete_due_between(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start,
            end,
            calendars: None,
            incomplete_only: true,
        }
    }

    /// Half-open window check: `start <= due < end`. Undated reminders never match.
    pub fn matches(&self, record: &ReminderRecord) -> bool {
        if self.incomplete_only && record.is_completed {
            return false;
        }
        if let Some(ref calendars) = self.calendars {
            if !calendars.iter().any(|c| *c == record.calendar_name) {
                return false;
            }
        }
        match record.due_date {
            Some(due) => due >= self.start && due < self.end,
            None => false,
        }
    }
}

#[async_trait]
pub trait ReminderPlatform: Send + Sync {
    /// Ask the host to authorize one scope. Resolves when the host answers.
    async fn request_access(&self, scope: AccessScope) -> Result<bool, PlatformError>;

    async fn fetch_reminders(
        &self,
        query: &ReminderQuery,
    ) -> Result<Vec<ReminderRecord>, PlatformError>;

    /// Set the completion flag and commit immediately. Last writer wins.
    async fn save_completion(&self, reminder_id: &str, completed: bool)
        -> Result<(), PlatformError>;

    async fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<CalendarEvent>, PlatformError>;

    async fn calendars(&self) -> Result<Vec<CalendarInfo>, PlatformError>;
}
