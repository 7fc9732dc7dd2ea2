use std::sync::Mutex;

use async_trait::async_trait;
use block2::RcBlock;
use chrono::{DateTime, Local, TimeZone};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{
    EKAuthorizationStatus, EKCalendar, EKEntityType, EKEvent, EKEventStore, EKReminder,
};
use objc2_foundation::{NSArray, NSCalendar, NSDate, NSError, NSString};
use ratatui::style::Color;
use tokio::sync::oneshot;
use tracing::debug;

use super::{
    AccessScope, CalendarEvent, CalendarInfo, PlatformError, ReminderPlatform, ReminderQuery,
    ReminderRecord,
};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// Apple Reminders and Calendar through EventKit.
pub struct EventKitPlatform {
    store: Retained<EKEventStore>,
}

// SAFETY: EKEventStore may be used from any thread once created; every
// completion handler hands its result back through a channel instead of
// touching shared state.
unsafe impl Send for EventKitPlatform {}
unsafe impl Sync for EventKitPlatform {}

impl EventKitPlatform {
    pub fn new() -> Self {
        let store = unsafe { EKEventStore::new() };
        Self { store }
    }

    pub fn authorization_status(scope: AccessScope) -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(entity_type(scope)) }
    }

    fn request_access_receiver(
        &self,
        scope: AccessScope,
    ) -> oneshot::Receiver<Result<bool, PlatformError>> {
        let (tx, rx) = oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let block = RcBlock::new(move |granted: Bool, error: *mut NSError| {
            let result = match unsafe { error.as_ref() } {
                Some(err) => Err(ns_error(err)),
                None => Ok(granted.as_bool()),
            };
            if let Some(tx) = tx.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = tx.send(result);
            }
        });

        unsafe {
            match scope {
                AccessScope::Reminders => self
                    .store
                    .requestFullAccessToRemindersWithCompletion(&*block as *const _ as *mut _),
                AccessScope::Events => self
                    .store
                    .requestFullAccessToEventsWithCompletion(&*block as *const _ as *mut _),
            }
        }
        rx
    }

    fn fetch_receiver(
        &self,
        query: &ReminderQuery,
    ) -> oneshot::Receiver<Option<Vec<ReminderRecord>>> {
        let ns_start = datetime_to_nsdate(&query.start);
        let ns_end = datetime_to_nsdate(&query.end);

        let calendars = query.calendars.as_ref().map(|names| {
            let all = unsafe { self.store.calendarsForEntityType(EKEntityType::Reminder) };
            let picked: Vec<Retained<EKCalendar>> = all
                .iter()
                .filter(|cal| {
                    let title = unsafe { cal.title().to_string() };
                    names.iter().any(|n| *n == title)
                })
                .collect();
            NSArray::from_retained_slice(&picked)
        });

        let predicate = unsafe {
            self.store
                .predicateForIncompleteRemindersWithDueDateStarting_ending_calendars(
                    Some(&ns_start),
                    Some(&ns_end),
                    calendars.as_deref(),
                )
        };

        let (tx, rx) = oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let block = RcBlock::new(move |reminders: *mut NSArray<EKReminder>| {
            let converted = unsafe { reminders.as_ref() }.map(|array| {
                array
                    .iter()
                    .map(|rem| convert_reminder(&rem))
                    .collect::<Vec<_>>()
            });
            if let Some(tx) = tx.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = tx.send(converted);
            }
        });

        unsafe {
            self.store
                .fetchRemindersMatchingPredicate_completion(&predicate, &block);
        }
        rx
    }

    fn save_now(&self, reminder_id: &str, completed: bool) -> Result<(), PlatformError> {
        let ns_id = NSString::from_str(reminder_id);
        let item = unsafe { self.store.calendarItemWithIdentifier(&ns_id) }
            .ok_or_else(|| PlatformError::new(format!("reminder {reminder_id} no longer exists")))?;
        let reminder = item
            .downcast::<EKReminder>()
            .map_err(|_| PlatformError::new(format!("{reminder_id} is not a reminder")))?;

        unsafe {
            reminder.setCompleted(completed);
            self.store
                .saveReminder_commit_error(&reminder, true)
                .map_err(|err| ns_error(&err))
        }
    }

    fn events_now(&self, start: DateTime<Local>, end: DateTime<Local>) -> Vec<CalendarEvent> {
        let ns_start = datetime_to_nsdate(&start);
        let ns_end = datetime_to_nsdate(&end);

        let predicate = unsafe {
            self.store
                .predicateForEventsWithStartDate_endDate_calendars(&ns_start, &ns_end, None)
        };

        let ek_events = unsafe { self.store.eventsMatchingPredicate(&predicate) };
        let mut events: Vec<CalendarEvent> =
            ek_events.iter().map(|ev| convert_event(&ev)).collect();
        events.sort_by_key(|e| e.start);
        events
    }

    fn calendars_now(&self) -> Vec<CalendarInfo> {
        let ek_calendars = unsafe { self.store.calendarsForEntityType(EKEntityType::Event) };

        ek_calendars
            .iter()
            .map(|cal| {
                let id = unsafe { cal.calendarIdentifier().to_string() };
                let title = unsafe { cal.title().to_string() };
                let source = unsafe {
                    cal.source()
                        .map(|s| s.title().to_string())
                        .unwrap_or_default()
                };
                CalendarInfo {
                    id,
                    title,
                    color: calendar_color(&cal),
                    source,
                }
            })
            .collect()
    }
}

impl Default for EventKitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderPlatform for EventKitPlatform {
    async fn request_access(&self, scope: AccessScope) -> Result<bool, PlatformError> {
        match Self::authorization_status(scope) {
            EKAuthorizationStatus::FullAccess => return Ok(true),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                return Ok(false);
            }
            _ => {}
        }

        let rx = self.request_access_receiver(scope);
        rx.await
            .map_err(|_| PlatformError::new(format!("{scope} access handler was dropped")))?
    }

    async fn fetch_reminders(
        &self,
        query: &ReminderQuery,
    ) -> Result<Vec<ReminderRecord>, PlatformError> {
        let rx = self.fetch_receiver(query);
        let fetched = rx
            .await
            .map_err(|_| PlatformError::new("reminder fetch handler was dropped"))?;
        match fetched {
            Some(reminders) => {
                debug!(count = reminders.len(), "eventkit returned reminders");
                Ok(reminders)
            }
            None => Err(PlatformError::new("EventKit returned no reminder list")),
        }
    }

    async fn save_completion(
        &self,
        reminder_id: &str,
        completed: bool,
    ) -> Result<(), PlatformError> {
        self.save_now(reminder_id, completed)
    }

    async fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<CalendarEvent>, PlatformError> {
        Ok(self.events_now(start, end))
    }

    async fn calendars(&self) -> Result<Vec<CalendarInfo>, PlatformError> {
        Ok(self.calendars_now())
    }
}

fn entity_type(scope: AccessScope) -> EKEntityType {
    match scope {
        AccessScope::Reminders => EKEntityType::Reminder,
        AccessScope::Events => EKEntityType::Event,
    }
}

fn ns_error(err: &NSError) -> PlatformError {
    let message = err.localizedDescription().to_string();
    PlatformError::with_code(message, err.code() as i64)
}

fn convert_reminder(rem: &EKReminder) -> ReminderRecord {
    let id = unsafe { rem.calendarItemIdentifier().to_string() };
    let title = unsafe { rem.title().to_string() };
    let is_completed = unsafe { rem.isCompleted() };
    let priority = unsafe { rem.priority() }.min(9) as u8;
    let due_date = unsafe {
        rem.dueDateComponents().and_then(|components| {
            NSCalendar::currentCalendar()
                .dateFromComponents(&components)
                .map(|date| nsdate_to_datetime(&date))
        })
    };
    let (calendar_name, calendar_color) = unsafe {
        rem.calendar()
            .map(|cal| (cal.title().to_string(), calendar_color(&cal)))
            .unwrap_or(("Reminders".to_string(), Color::White))
    };

    ReminderRecord {
        id,
        title,
        is_completed,
        due_date,
        calendar_name,
        calendar_color,
        priority,
    }
}

fn convert_event(ev: &EKEvent) -> CalendarEvent {
    let id = unsafe {
        ev.eventIdentifier()
            .map(|s| s.to_string())
            .unwrap_or_default()
    };
    let title = unsafe { ev.title().to_string() };
    let start = unsafe { nsdate_to_datetime(&ev.startDate()) };
    let end = unsafe { nsdate_to_datetime(&ev.endDate()) };
    let is_all_day = unsafe { ev.isAllDay() };
    let location = unsafe { ev.location().map(|s| s.to_string()) };
    let notes = unsafe { ev.notes().map(|s| s.to_string()) };
    let (calendar_name, calendar_color) = unsafe {
        ev.calendar()
            .map(|cal| (cal.title().to_string(), calendar_color(&cal)))
            .unwrap_or(("Unknown".to_string(), Color::White))
    };

    CalendarEvent {
        id,
        title,
        start,
        end,
        is_all_day,
        calendar_name,
        calendar_color,
        location,
        notes,
    }
}

fn calendar_color(cal: &EKCalendar) -> Color {
    unsafe {
        if let Some(cg_color) = cal.CGColor() {
            use objc2::msg_send;
            let num_components: usize = msg_send![&*cg_color, numberOfComponents];
            if num_components >= 3 {
                let components: *const f64 = msg_send![&*cg_color, components];
                let r = *components;
                let g = *components.add(1);
                let b = *components.add(2);
                return Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
            }
        }
    }
    Color::White
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    let nsdate_ts = unix_ts - NSDATE_UNIX_OFFSET;
    NSDate::dateWithTimeIntervalSinceReferenceDate(nsdate_ts)
}

fn nsdate_to_datetime(date: &NSDate) -> DateTime<Local> {
    let nsdate_ts = date.timeIntervalSinceReferenceDate();
    let unix_ts = (nsdate_ts + NSDATE_UNIX_OFFSET) as i64;
    Local
        .timestamp_opt(unix_ts, 0)
        .single()
        .unwrap_or_else(Local::now)
}
