//! Reminders, calendar and analytics in the terminal, backed by the host's
//! personal-data store.

pub mod analytics;
pub mod app;
pub mod calendar;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod model;
pub mod sync;
pub mod theme;
pub mod tui;

pub use calendar::{AccessScope, InMemoryPlatform, PlatformError, ReminderPlatform, ReminderRecord};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AuthorizationError, FetchError, StoreWriteError};
pub use sync::{
    AccessOutcome, PermissionGateway, ReminderListState, ReminderStore, ReminderSyncController,
    SyncPhase, ToggleOutcome,
};
