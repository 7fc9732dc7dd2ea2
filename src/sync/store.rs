use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::{ReminderPlatform, ReminderQuery, ReminderRecord};
use crate::clock::{day_window, Clock};
use crate::error::{FetchError, StoreWriteError};

/// Reads incomplete reminders for a day and writes completion changes back.
/// Holds nothing between calls; every fetch is a fresh snapshot.
#[derive(Clone)]
pub struct ReminderStore {
    platform: Arc<dyn ReminderPlatform>,
    clock: Arc<dyn Clock>,
}

impl ReminderStore {
    pub fn new(platform: Arc<dyn ReminderPlatform>, clock: Arc<dyn Clock>) -> Self {
        Self { platform, clock }
    }

    /// Incomplete reminders due within today's local window, across every
    /// calendar.
    pub async fn fetch_today(&self) -> Result<Vec<ReminderRecord>, FetchError> {
        self.fetch_day(self.clock.today()).await
    }

    pub async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<ReminderRecord>, FetchError> {
        let (start, end) = day_window(date).ok_or(FetchError::InvalidDay(date))?;
        let query = ReminderQuery::incomplete_due_between(start, end);

        let mut reminders = self.platform.fetch_reminders(&query).await.map_err(|err| {
            warn!(%date, error = %err, "reminder fetch failed");
            FetchError::Platform(err)
        })?;

        reminders.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        debug!(%date, count = reminders.len(), "fetched reminders");
        Ok(reminders)
    }

    /// Commits `completed` for `record` immediately. No version check; the
    /// last write wins.
    pub async fn update(
        &self,
        record: &ReminderRecord,
        completed: bool,
    ) -> Result<(), StoreWriteError> {
        self.platform
            .save_completion(&record.id, completed)
            .await
            .map_err(|source| StoreWriteError {
                reminder_id: record.id.clone(),
                source,
            })
    }
}
