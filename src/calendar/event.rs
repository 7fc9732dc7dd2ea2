use chrono::{DateTime, Local, NaiveDate};
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub is_all_day: bool,
    pub calendar_name: String,
    pub calendar_color: Color,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CalendarEvent {
    pub fn duration_display(&self) -> String {
        if self.is_all_day {
            "All day".to_string()
        } else {
            let start = self.start.format("%H:%M");
            let end = self.end.format("%H:%M");
            format!("{} - {}", start, end)
        }
    }

    /// True when any part of the event falls on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        let first = self.start.date_naive();
        let last = if self.end > self.start {
            // An event ending exactly at midnight does not spill into that day.
            (self.end - chrono::Duration::seconds(1)).date_naive()
        } else {
            first
        };
        first <= date && date <= last
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn event(start: DateTime<Local>, end: DateTime<Local>) -> CalendarEvent {
        CalendarEvent {
            id: "e1".to_string(),
            title: "Review".to_string(),
            start,
            end,
            is_all_day: false,
            calendar_name: "Work".to_string(),
            calendar_color: Color::Blue,
            location: None,
            notes: None,
        }
    }

    #[test]
    fn duration_display_formats_times() {
        let ev = event(
            Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            Local.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
        );
        assert_eq!(ev.duration_display(), "09:00 - 10:30");
    }

    #[test]
    fn event_ending_at_midnight_stays_on_its_day() {
        let ev = event(
            Local.with_ymd_and_hms(2024, 3, 15, 22, 0, 0).unwrap(),
            Local.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap(),
        );
        assert!(ev.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert!(!ev.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
    }
}
