#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use taskdeck::calendar::{
    AccessScope, CalendarEvent, CalendarInfo, InMemoryPlatform, PlatformError, ReminderPlatform,
    ReminderQuery, ReminderRecord,
};
use taskdeck::clock::{Clock, FixedClock};
use tokio::sync::{mpsc, oneshot};

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// 2024-03-15 10:00 local.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(local(2024, 3, 15, 10, 0, 0)))
}

pub fn reminder(id: &str, due: DateTime<Local>) -> ReminderRecord {
    ReminderRecord::new(id, format!("Reminder {id}")).due(due)
}

type AccessAnswer = Result<bool, PlatformError>;

/// Wraps the in-memory store and lets a test decide when access answers and
/// fetch results are delivered.
pub struct GatedPlatform {
    pub inner: InMemoryPlatform,
    access_gates: Mutex<HashMap<AccessScope, oneshot::Receiver<AccessAnswer>>>,
    fetch_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    fetch_started: mpsc::UnboundedSender<Vec<ReminderRecord>>,
}

impl GatedPlatform {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Vec<ReminderRecord>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let platform = Arc::new(Self {
            inner: InMemoryPlatform::new(),
            access_gates: Mutex::new(HashMap::new()),
            fetch_gates: Mutex::new(VecDeque::new()),
            fetch_started: tx,
        });
        (platform, rx)
    }

    /// The next access request for `scope` waits for the returned sender.
    pub fn gate_access(&self, scope: AccessScope) -> oneshot::Sender<AccessAnswer> {
        let (tx, rx) = oneshot::channel();
        self.access_gates.lock().unwrap().insert(scope, rx);
        tx
    }

    /// The next ungated fetch takes its snapshot immediately but only
    /// returns once the sender fires.
    pub fn gate_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.fetch_gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl ReminderPlatform for GatedPlatform {
    async fn request_access(&self, scope: AccessScope) -> Result<bool, PlatformError> {
        let gate = self.access_gates.lock().unwrap().remove(&scope);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PlatformError::new("gate dropped"))),
            None => self.inner.request_access(scope).await,
        }
    }

    async fn fetch_reminders(
        &self,
        query: &ReminderQuery,
    ) -> Result<Vec<ReminderRecord>, PlatformError> {
        let snapshot = self.inner.fetch_reminders(query).await?;
        let _ = self.fetch_started.send(snapshot.clone());
        let gate = self.fetch_gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        Ok(snapshot)
    }

    async fn save_completion(
        &self,
        reminder_id: &str,
        completed: bool,
    ) -> Result<(), PlatformError> {
        self.inner.save_completion(reminder_id, completed).await
    }

    async fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<CalendarEvent>, PlatformError> {
        self.inner.events_in_range(start, end).await
    }

    async fn calendars(&self) -> Result<Vec<CalendarInfo>, PlatformError> {
        self.inner.calendars().await
    }
}
