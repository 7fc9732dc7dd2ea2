use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarEvent, CalendarInfo, PlatformError, ReminderPlatform};
use crate::clock::day_window;

/// Read-only view of calendar events for the Calendar tab.
#[derive(Clone)]
pub struct CalendarAgenda {
    platform: Arc<dyn ReminderPlatform>,
}

impl CalendarAgenda {
    pub fn new(platform: Arc<dyn ReminderPlatform>) -> Self {
        Self { platform }
    }

    pub async fn events_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, PlatformError> {
        let (start, end) = day_window(date)
            .ok_or_else(|| PlatformError::new(format!("no local midnight on {date}")))?;
        self.platform.events_in_range(start, end).await
    }

    pub async fn events_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarEvent>, PlatformError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PlatformError::new(format!("invalid month {year}-{month}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| PlatformError::new(format!("invalid month {year}-{month}")))?;

        let (start, _) = day_window(first)
            .ok_or_else(|| PlatformError::new(format!("no local midnight on {first}")))?;
        let (end, _) = day_window(next)
            .ok_or_else(|| PlatformError::new(format!("no local midnight on {next}")))?;
        self.platform.events_in_range(start, end).await
    }

    pub async fn calendars(&self) -> Result<Vec<CalendarInfo>, PlatformError> {
        self.platform.calendars().await
    }
}

/// Days of `year`/`month` that have at least one event.
pub fn days_with_events(events: &[CalendarEvent], year: i32, month: u32) -> Vec<u32> {
    let mut days: Vec<u32> = events
        .iter()
        .map(|ev| ev.start.date_naive())
        .filter(|d| d.year() == year && d.month() == month)
        .map(|d| d.day())
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use ratatui::style::Color;

    use super::*;
    use crate::calendar::InMemoryPlatform;

    fn event(id: &str, day: u32, month: u32) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start: Local.with_ymd_and_hms(2024, month, day, 9, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap(),
            is_all_day: false,
            calendar_name: "Work".to_string(),
            calendar_color: Color::Blue,
            location: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn month_query_excludes_neighbouring_months() {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.add_event(event("feb", 29, 2));
        platform.add_event(event("mar-1", 1, 3));
        platform.add_event(event("mar-31", 31, 3));
        platform.add_event(event("apr", 1, 4));

        let agenda = CalendarAgenda::new(platform);
        let events = agenda.events_for_month(2024, 3).await.unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["mar-1", "mar-31"]);
        assert_eq!(days_with_events(&events, 2024, 3), vec![1, 31]);
    }

    #[tokio::test]
    async fn day_query_returns_only_that_day() {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.add_event(event("a", 14, 3));
        platform.add_event(event("b", 15, 3));

        let agenda = CalendarAgenda::new(platform);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let events = agenda.events_for_date(date).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "b");
    }
}
