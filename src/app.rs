use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

use crate::analytics::AnalyticsModel;
use crate::calendar::{CalendarEvent, CalendarInfo, ReminderRecord};
use crate::clock::Clock;
use crate::sync::{CalendarAgenda, ReminderListState, ReminderSyncController, ToggleOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Act,
    Calendar,
    Analytics,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Act, Tab::Calendar, Tab::Analytics, Tab::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Act => "Act",
            Tab::Calendar => "Calendar",
            Tab::Analytics => "Analytics",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Results of background work, drained on the UI thread.
#[derive(Debug)]
enum AppUpdate {
    Toggled { title: String, outcome: ToggleOutcome },
    Refreshed,
}

/// Static facts shown on the Settings tab.
#[derive(Debug, Clone, Default)]
pub struct SettingsInfo {
    pub backend: String,
    pub theme: String,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub access_timeout_secs: u64,
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub act_selected: usize,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub month_events: Vec<CalendarEvent>,
    pub day_events: Vec<CalendarEvent>,
    pub today_events: Vec<CalendarEvent>,
    pub days_with_events: HashSet<u32>,
    pub calendars: Vec<CalendarInfo>,
    pub analytics: AnalyticsModel,
    pub settings: SettingsInfo,
    events_loaded: bool,
    controller: Arc<ReminderSyncController>,
    agenda: CalendarAgenda,
    clock: Arc<dyn Clock>,
    runtime: Handle,
    updates_tx: mpsc::UnboundedSender<AppUpdate>,
    updates_rx: mpsc::UnboundedReceiver<AppUpdate>,
}

impl App {
    /// `runtime` must not be the current thread's runtime: calendar reads
    /// block on it.
    pub fn new(
        controller: Arc<ReminderSyncController>,
        agenda: CalendarAgenda,
        clock: Arc<dyn Clock>,
        runtime: Handle,
        settings: SettingsInfo,
    ) -> Self {
        let today = clock.today();
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let mut analytics = AnalyticsModel::new();
        analytics.fetch_data(analytics.period());

        Self {
            running: true,
            tab: Tab::Home,
            show_help: false,
            status_message: None,
            act_selected: 0,
            selected_date: today,
            today,
            month_events: Vec::new(),
            day_events: Vec::new(),
            today_events: Vec::new(),
            days_with_events: HashSet::new(),
            calendars: Vec::new(),
            analytics,
            settings,
            events_loaded: false,
            controller,
            agenda,
            clock,
            runtime,
            updates_tx,
            updates_rx,
        }
    }

    pub fn controller(&self) -> &Arc<ReminderSyncController> {
        &self.controller
    }

    pub fn reminder_state(&self) -> ReminderListState {
        self.controller.list()
    }

    /// Once per frame: apply finished background work and load calendar
    /// events as soon as the access request has answered.
    pub fn tick(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            match update {
                AppUpdate::Toggled { title, outcome } => {
                    self.status_message = Some(match outcome {
                        ToggleOutcome::Applied => format!("Updated \"{}\"", title),
                        ToggleOutcome::Rejected(reason) => {
                            format!("Could not update \"{}\": {}", title, reason)
                        }
                    });
                }
                AppUpdate::Refreshed => {
                    self.status_message = Some("Reminders refreshed".to_string());
                }
            }
        }

        let len = self.reminder_state().reminders().len();
        if self.act_selected >= len {
            self.act_selected = len.saturating_sub(1);
        }

        if !self.events_loaded && self.controller.access().is_some() {
            self.events_loaded = true;
            self.refresh_events();
            self.load_calendars();
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::from_index(index) {
            self.tab = tab;
        }
    }

    pub fn select_next_reminder(&mut self) {
        let len = self.reminder_state().reminders().len();
        if len > 0 {
            self.act_selected = (self.act_selected + 1).min(len - 1);
        }
    }

    pub fn select_prev_reminder(&mut self) {
        self.act_selected = self.act_selected.saturating_sub(1);
    }

    pub fn selected_reminder(&self) -> Option<ReminderRecord> {
        self.reminder_state()
            .reminders()
            .get(self.act_selected)
            .cloned()
    }

    pub fn toggle_selected_reminder(&mut self) {
        let Some(record) = self.selected_reminder() else {
            return;
        };
        let controller = self.controller.clone();
        let tx = self.updates_tx.clone();
        self.runtime.spawn(async move {
            let outcome = controller.toggle_completion(&record).await;
            let _ = tx.send(AppUpdate::Toggled {
                title: record.title,
                outcome,
            });
        });
    }

    pub fn refresh_reminders(&mut self) {
        let controller = self.controller.clone();
        let tx = self.updates_tx.clone();
        self.runtime.spawn(async move {
            controller.refresh().await;
            let _ = tx.send(AppUpdate::Refreshed);
        });
    }

    pub fn next_period(&mut self) {
        let period = self.analytics.period().next();
        self.analytics.fetch_data(period);
    }

    pub fn prev_period(&mut self) {
        let period = self.analytics.period().prev();
        self.analytics.fetch_data(period);
    }

    pub fn refresh_events(&mut self) {
        let year = self.selected_date.year();
        let month = self.selected_date.month();

        let agenda = self.agenda.clone();
        let date = self.selected_date;
        let (month_events, day_events) = self.runtime.block_on(async move {
            (
                agenda.events_for_month(year, month).await,
                agenda.events_for_date(date).await,
            )
        });

        self.month_events = month_events.unwrap_or_else(|err| {
            warn!(error = %err, "month events unavailable");
            Vec::new()
        });
        self.day_events = day_events.unwrap_or_else(|err| {
            warn!(error = %err, "day events unavailable");
            Vec::new()
        });

        self.days_with_events =
            crate::sync::agenda::days_with_events(&self.month_events, year, month)
                .into_iter()
                .collect();
        if self.selected_date == self.today {
            self.today_events = self.day_events.clone();
        }
    }

    fn load_calendars(&mut self) {
        let agenda = self.agenda.clone();
        self.calendars = self
            .runtime
            .block_on(async move { agenda.calendars().await })
            .unwrap_or_else(|err| {
                warn!(error = %err, "calendar list unavailable");
                Vec::new()
            });
    }

    pub fn next_day(&mut self) {
        self.move_to(self.selected_date.succ_opt().unwrap_or(self.selected_date));
    }

    pub fn prev_day(&mut self) {
        self.move_to(self.selected_date.pred_opt().unwrap_or(self.selected_date));
    }

    pub fn next_week(&mut self) {
        self.move_to(self.selected_date + Duration::weeks(1));
    }

    pub fn prev_week(&mut self) {
        self.move_to(self.selected_date - Duration::weeks(1));
    }

    pub fn next_month(&mut self) {
        let (year, month) = match self.selected_date.month() {
            12 => (self.selected_date.year() + 1, 1),
            m => (self.selected_date.year(), m + 1),
        };
        self.move_to(clamp_to_month(year, month, self.selected_date.day()));
    }

    pub fn prev_month(&mut self) {
        let (year, month) = match self.selected_date.month() {
            1 => (self.selected_date.year() - 1, 12),
            m => (self.selected_date.year(), m - 1),
        };
        self.move_to(clamp_to_month(year, month, self.selected_date.day()));
    }

    pub fn go_to_today(&mut self) {
        self.today = self.clock.today();
        self.move_to(self.today);
    }

    fn move_to(&mut self, date: NaiveDate) {
        let month_changed = date.year() != self.selected_date.year()
            || date.month() != self.selected_date.month();
        self.selected_date = date;

        if month_changed || self.month_events.is_empty() {
            self.refresh_events();
        } else {
            self.day_events = self
                .month_events
                .iter()
                .filter(|ev| ev.occurs_on(date))
                .cloned()
                .collect();
        }
    }
}

/// Day `day` of the month, or its last day when the month is shorter.
fn clamp_to_month(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or_default()
}
