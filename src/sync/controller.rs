use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::permission::{AccessOutcome, PermissionGateway};
use super::store::ReminderStore;
use crate::calendar::{ReminderPlatform, ReminderRecord};
use crate::clock::Clock;
use crate::error::FetchError;

/// Lifecycle of the controller.
///
/// `Uninitialized -> RequestingAccess -> Ready | AccessDenied`, then
/// `Ready -> Refreshing -> Ready` for every fetch. A later fetch failure never
/// moves back to `AccessDenied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    RequestingAccess,
    Ready,
    Refreshing,
    AccessDenied,
}

/// What the Act tab shows. Keeps "nothing due", "not allowed" and "could not
/// read" apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderListState {
    Loading,
    Denied,
    Failed(String),
    Empty,
    Loaded(Vec<ReminderRecord>),
}

impl ReminderListState {
    fn from_fetch(result: Result<Vec<ReminderRecord>, FetchError>) -> Self {
        match result {
            Ok(reminders) if reminders.is_empty() => ReminderListState::Empty,
            Ok(reminders) => ReminderListState::Loaded(reminders),
            Err(err) => ReminderListState::Failed(err.to_string()),
        }
    }

    pub fn reminders(&self) -> &[ReminderRecord] {
        match self {
            ReminderListState::Loaded(reminders) => reminders,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    /// The store refused the write; the published list was left as it was.
    Rejected(String),
}

pub struct ReminderSyncController {
    gateway: PermissionGateway,
    store: ReminderStore,
    phase: watch::Sender<SyncPhase>,
    list: watch::Sender<ReminderListState>,
    access: watch::Sender<Option<AccessOutcome>>,
    refreshes_in_flight: AtomicUsize,
}

impl ReminderSyncController {
    pub fn new(gateway: PermissionGateway, store: ReminderStore) -> Self {
        let (phase, _) = watch::channel(SyncPhase::Uninitialized);
        let (list, _) = watch::channel(ReminderListState::Loading);
        let (access, _) = watch::channel(None);
        Self {
            gateway,
            store,
            phase,
            list,
            access,
            refreshes_in_flight: AtomicUsize::new(0),
        }
    }

    /// Builds the controller and immediately starts the access request on the
    /// current tokio runtime.
    pub fn start(
        platform: Arc<dyn ReminderPlatform>,
        clock: Arc<dyn Clock>,
        access_timeout: Duration,
    ) -> (Arc<Self>, JoinHandle<AccessOutcome>) {
        let gateway = PermissionGateway::with_timeout(platform.clone(), access_timeout);
        let store = ReminderStore::new(platform, clock);
        let controller = Arc::new(Self::new(gateway, store));
        let handle = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.initialize().await })
        };
        (controller, handle)
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.borrow()
    }

    pub fn list(&self) -> ReminderListState {
        self.list.borrow().clone()
    }

    pub fn access(&self) -> Option<AccessOutcome> {
        self.access.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReminderListState> {
        self.list.subscribe()
    }

    /// Runs the access request and, when reminders are granted, the first
    /// fetch. Only the first call does anything; later calls return the
    /// recorded outcome.
    pub async fn initialize(&self) -> AccessOutcome {
        let claimed = self.phase.send_if_modified(|phase| {
            if *phase == SyncPhase::Uninitialized {
                *phase = SyncPhase::RequestingAccess;
                true
            } else {
                false
            }
        });
        if !claimed {
            return self.wait_for_access().await;
        }

        let outcome = self.gateway.request_access().await;
        self.access.send_replace(Some(outcome.clone()));

        // Events access is requested alongside but does not gate the list.
        if outcome.reminders_granted {
            self.phase.send_replace(SyncPhase::Ready);
            self.refresh().await;
        } else {
            warn!("reminders access denied; Act list stays empty");
            self.list.send_replace(ReminderListState::Denied);
            self.phase.send_replace(SyncPhase::AccessDenied);
        }
        outcome
    }

    async fn wait_for_access(&self) -> AccessOutcome {
        let mut rx = self.access.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(outcome) = current {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return AccessOutcome {
                    reminders_granted: false,
                    events_granted: false,
                    error: None,
                };
            }
        }
    }

    /// Replaces the published list with a fresh snapshot of today's
    /// reminders. Does nothing unless access was granted.
    pub async fn refresh(&self) -> ReminderListState {
        if !matches!(self.phase(), SyncPhase::Ready | SyncPhase::Refreshing) {
            return self.list();
        }

        self.refreshes_in_flight.fetch_add(1, Ordering::SeqCst);
        self.phase.send_replace(SyncPhase::Refreshing);

        let state = ReminderListState::from_fetch(self.store.fetch_today().await);
        if let ReminderListState::Failed(ref msg) = state {
            warn!(error = %msg, "refresh failed");
        }
        // Whole snapshot swap: readers see the old list or the new one.
        self.list.send_replace(state.clone());

        if self.refreshes_in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.phase.send_replace(SyncPhase::Ready);
        }
        state
    }

    /// Writes the inverted completion flag for `record`, then refetches.
    ///
    /// Overlapping toggles are not serialized: whichever refetch finishes last
    /// decides what is published.
    pub async fn toggle_completion(&self, record: &ReminderRecord) -> ToggleOutcome {
        let completed = !record.is_completed;
        match self.store.update(record, completed).await {
            Ok(()) => {
                info!(reminder = %record.id, completed, "reminder updated");
                self.refresh().await;
                ToggleOutcome::Applied
            }
            Err(err) => {
                warn!(reminder = %record.id, error = %err, "reminder update rejected");
                ToggleOutcome::Rejected(err.to_string())
            }
        }
    }
}
