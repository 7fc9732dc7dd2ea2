//! Local data shapes kept alongside the host-owned reminders. None of these
//! are persisted by the app itself.

pub mod activity;
pub mod data_point;
pub mod note;

pub use activity::{Activity, RecurrenceRule};
pub use data_point::DataPoint;
pub use note::Note;
