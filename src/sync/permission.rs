use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::calendar::{AccessScope, ReminderPlatform};
use crate::error::AuthorizationError;

pub const DEFAULT_ACCESS_TIMEOUT: Duration = Duration::from_secs(30);

/// Combined answer for both scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessOutcome {
    pub reminders_granted: bool,
    pub events_granted: bool,
    /// First failure, reminders scope before events scope.
    pub error: Option<AuthorizationError>,
}

impl AccessOutcome {
    fn merge(
        reminders: Result<bool, AuthorizationError>,
        events: Result<bool, AuthorizationError>,
    ) -> Self {
        let (reminders_granted, reminders_err) = split(reminders);
        let (events_granted, events_err) = split(events);
        Self {
            reminders_granted,
            events_granted,
            error: reminders_err.or(events_err),
        }
    }

    pub fn fully_granted(&self) -> bool {
        self.reminders_granted && self.events_granted
    }
}

fn split(result: Result<bool, AuthorizationError>) -> (bool, Option<AuthorizationError>) {
    match result {
        Ok(granted) => (granted, None),
        Err(err) => (false, Some(err)),
    }
}

/// Requests both scopes concurrently and reports once both have answered or
/// timed out. A scope that does not answer in time counts as denied.
#[derive(Clone)]
pub struct PermissionGateway {
    platform: Arc<dyn ReminderPlatform>,
    timeout: Duration,
}

impl PermissionGateway {
    pub fn new(platform: Arc<dyn ReminderPlatform>) -> Self {
        Self::with_timeout(platform, DEFAULT_ACCESS_TIMEOUT)
    }

    pub fn with_timeout(platform: Arc<dyn ReminderPlatform>, timeout: Duration) -> Self {
        Self { platform, timeout }
    }

    pub async fn request_access(&self) -> AccessOutcome {
        let (reminders, events) = tokio::join!(
            self.request_scope(AccessScope::Reminders),
            self.request_scope(AccessScope::Events),
        );
        let outcome = AccessOutcome::merge(reminders, events);

        match outcome.error {
            Some(ref err) => warn!(
                reminders = outcome.reminders_granted,
                events = outcome.events_granted,
                error = %err,
                "access request finished with error"
            ),
            None => info!(
                reminders = outcome.reminders_granted,
                events = outcome.events_granted,
                "access request finished"
            ),
        }
        outcome
    }

    async fn request_scope(&self, scope: AccessScope) -> Result<bool, AuthorizationError> {
        let result =
            match tokio::time::timeout(self.timeout, self.platform.request_access(scope)).await {
                Ok(Ok(granted)) => Ok(granted),
                Ok(Err(source)) => Err(AuthorizationError::Platform { scope, source }),
                Err(_) => Err(AuthorizationError::TimedOut {
                    scope,
                    secs: self.timeout.as_secs(),
                }),
            };
        // Only one error survives the merge; keep both in the log.
        if let Err(ref err) = result {
            warn!(%scope, error = %err, "scope request failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{InMemoryPlatform, PlatformError};

    #[tokio::test]
    async fn reminders_error_wins_when_both_scopes_fail() {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.fail_grant(AccessScope::Reminders, PlatformError::new("reminders broke"));
        platform.fail_grant(AccessScope::Events, PlatformError::new("events broke"));

        let outcome = PermissionGateway::new(platform).request_access().await;

        assert!(!outcome.reminders_granted);
        assert!(!outcome.events_granted);
        let err = outcome.error.expect("an error must surface");
        assert_eq!(err.scope(), AccessScope::Reminders);
    }

    #[tokio::test]
    async fn events_error_surfaces_when_reminders_succeed() {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.fail_grant(AccessScope::Events, PlatformError::with_code("denied", 1));

        let outcome = PermissionGateway::new(platform).request_access().await;

        assert!(outcome.reminders_granted);
        assert!(!outcome.events_granted);
        assert_eq!(outcome.error.map(|e| e.scope()), Some(AccessScope::Events));
    }

    #[tokio::test]
    async fn plain_denial_carries_no_error() {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.set_grant(AccessScope::Reminders, false);

        let outcome = PermissionGateway::new(platform).request_access().await;

        assert!(!outcome.reminders_granted);
        assert!(outcome.events_granted);
        assert!(outcome.error.is_none());
        assert!(!outcome.fully_granted());
    }
}
