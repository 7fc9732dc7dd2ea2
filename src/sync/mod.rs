//! Permission-gated reminder synchronization.
//!
//! [`PermissionGateway`] joins the two scope grants, [`ReminderStore`] reads
//! and writes today's reminders, and [`ReminderSyncController`] ties both into
//! the state the Act tab renders.

pub mod agenda;
pub mod controller;
pub mod permission;
pub mod store;

pub use agenda::CalendarAgenda;
pub use controller::{ReminderListState, ReminderSyncController, SyncPhase, ToggleOutcome};
pub use permission::{AccessOutcome, PermissionGateway, DEFAULT_ACCESS_TIMEOUT};
pub use store::ReminderStore;
