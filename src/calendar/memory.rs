use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use ratatui::style::Color;

use super::{
    AccessScope, CalendarEvent, CalendarInfo, PlatformError, ReminderPlatform, ReminderQuery,
    ReminderRecord,
};

/// Process-local stand-in for the host store. Backs the app on hosts without
/// EventKit and gives tests full control over grants and failures.
#[derive(Default)]
pub struct InMemoryPlatform {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    reminders: Vec<ReminderRecord>,
    events: Vec<CalendarEvent>,
    calendars: Vec<CalendarInfo>,
    reminders_grant: Grant,
    events_grant: Grant,
    fetch_failure: Option<PlatformError>,
    write_failure: Option<PlatformError>,
    writes: usize,
}

#[derive(Clone)]
enum Grant {
    Answer(bool),
    Fail(PlatformError),
}

impl Default for Grant {
    fn default() -> Self {
        Grant::Answer(true)
    }
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a handful of reminders and events around `today` so the UI has
    /// something to show without a real store.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let platform = Self::new();
        let at = |days: i64, hour: u32, min: u32| -> Option<DateTime<Local>> {
            let date = today + Duration::days(days);
            Local
                .from_local_datetime(&date.and_hms_opt(hour, min, 0)?)
                .earliest()
        };

        platform.add_calendar(CalendarInfo {
            id: "cal-personal".to_string(),
            title: "Personal".to_string(),
            color: Color::Green,
            source: "Local".to_string(),
        });
        platform.add_calendar(CalendarInfo {
            id: "cal-work".to_string(),
            title: "Work".to_string(),
            color: Color::Blue,
            source: "Local".to_string(),
        });

        let reminders = [
            ("r-1", "Morning run", 0, 7, 30, "Personal", Color::Green, 0),
            ("r-2", "Send weekly report", 0, 11, 0, "Work", Color::Blue, 1),
            ("r-3", "Call the dentist", 0, 15, 0, "Personal", Color::Green, 5),
            ("r-4", "Water the plants", 0, 19, 0, "Personal", Color::Green, 0),
            ("r-5", "Renew passport", 1, 9, 0, "Personal", Color::Green, 9),
        ];
        for (id, title, days, hour, min, cal, color, priority) in reminders {
            let mut rec = ReminderRecord::new(id, title);
            rec.due_date = at(days, hour, min);
            rec.calendar_name = cal.to_string();
            rec.calendar_color = color;
            rec.priority = priority;
            platform.add_reminder(rec);
        }

        let events = [
            ("e-1", "Standup", 0, (9, 30), (9, 45), "Work", Color::Blue),
            ("e-2", "Lunch with Sam", 0, (12, 30), (13, 30), "Personal", Color::Green),
            ("e-3", "Design review", 2, (14, 0), (15, 0), "Work", Color::Blue),
        ];
        for (id, title, days, (sh, sm), (eh, em), cal, color) in events {
            if let (Some(start), Some(end)) = (at(days, sh, sm), at(days, eh, em)) {
                platform.add_event(CalendarEvent {
                    id: id.to_string(),
                    title: title.to_string(),
                    start,
                    end,
                    is_all_day: false,
                    calendar_name: cal.to_string(),
                    calendar_color: color,
                    location: None,
                    notes: None,
                });
            }
        }

        platform
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_reminder(&self, reminder: ReminderRecord) {
        self.lock().reminders.push(reminder);
    }

    pub fn add_event(&self, event: CalendarEvent) {
        self.lock().events.push(event);
    }

    pub fn add_calendar(&self, calendar: CalendarInfo) {
        self.lock().calendars.push(calendar);
    }

    pub fn set_grant(&self, scope: AccessScope, granted: bool) {
        let mut state = self.lock();
        match scope {
            AccessScope::Reminders => state.reminders_grant = Grant::Answer(granted),
            AccessScope::Events => state.events_grant = Grant::Answer(granted),
        }
    }

    pub fn fail_grant(&self, scope: AccessScope, error: PlatformError) {
        let mut state = self.lock();
        match scope {
            AccessScope::Reminders => state.reminders_grant = Grant::Fail(error),
            AccessScope::Events => state.events_grant = Grant::Fail(error),
        }
    }

    pub fn fail_fetches(&self, error: Option<PlatformError>) {
        self.lock().fetch_failure = error;
    }

    pub fn fail_writes(&self, error: Option<PlatformError>) {
        self.lock().write_failure = error;
    }

    /// Snapshot of every stored reminder, completed ones included.
    pub fn reminders(&self) -> Vec<ReminderRecord> {
        self.lock().reminders.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

#[async_trait]
impl ReminderPlatform for InMemoryPlatform {
    async fn request_access(&self, scope: AccessScope) -> Result<bool, PlatformError> {
        let state = self.lock();
        let grant = match scope {
            AccessScope::Reminders => state.reminders_grant.clone(),
            AccessScope::Events => state.events_grant.clone(),
        };
        match grant {
            Grant::Answer(granted) => Ok(granted),
            Grant::Fail(err) => Err(err),
        }
    }

    async fn fetch_reminders(
        &self,
        query: &ReminderQuery,
    ) -> Result<Vec<ReminderRecord>, PlatformError> {
        let state = self.lock();
        if let Some(ref err) = state.fetch_failure {
            return Err(err.clone());
        }
        Ok(state
            .reminders
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn save_completion(
        &self,
        reminder_id: &str,
        completed: bool,
    ) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if let Some(ref err) = state.write_failure {
            return Err(err.clone());
        }
        let reminder = state
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder_id)
            .ok_or_else(|| PlatformError::new(format!("no reminder with id {reminder_id}")))?;
        reminder.is_completed = completed;
        state.writes += 1;
        Ok(())
    }

    async fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<CalendarEvent>, PlatformError> {
        let state = self.lock();
        let mut events: Vec<CalendarEvent> = state
            .events
            .iter()
            .filter(|e| e.start < end && e.end > start)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    async fn calendars(&self) -> Result<Vec<CalendarInfo>, PlatformError> {
        Ok(self.lock().calendars.clone())
    }
}
