mod common;

use std::sync::Arc;
use std::time::Duration;

use common::GatedPlatform;
use taskdeck::calendar::{AccessScope, PlatformError, ReminderPlatform};
use taskdeck::{AuthorizationError, PermissionGateway};

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn run_join(reminders: bool, events: bool, events_first: bool) {
    let (platform, _fetches) = GatedPlatform::new();
    let reminders_tx = platform.gate_access(AccessScope::Reminders);
    let events_tx = platform.gate_access(AccessScope::Events);

    let gateway = PermissionGateway::new(platform.clone() as Arc<dyn ReminderPlatform>);
    let handle = tokio::spawn(async move { gateway.request_access().await });
    settle().await;

    if events_first {
        events_tx.send(Ok(events)).unwrap();
        settle().await;
        assert!(!handle.is_finished(), "must wait for the reminders scope");
        reminders_tx.send(Ok(reminders)).unwrap();
    } else {
        reminders_tx.send(Ok(reminders)).unwrap();
        settle().await;
        assert!(!handle.is_finished(), "must wait for the events scope");
        events_tx.send(Ok(events)).unwrap();
    }

    let outcome = handle.await.unwrap();
    assert_eq!(outcome.reminders_granted, reminders);
    assert_eq!(outcome.events_granted, events);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn combined_result_matches_inputs_in_any_order() {
    for reminders in [true, false] {
        for events in [true, false] {
            for events_first in [true, false] {
                run_join(reminders, events, events_first).await;
            }
        }
    }
}

#[tokio::test]
async fn both_errors_never_report_success() {
    let (platform, _fetches) = GatedPlatform::new();
    let reminders_tx = platform.gate_access(AccessScope::Reminders);
    let events_tx = platform.gate_access(AccessScope::Events);

    let gateway = PermissionGateway::new(platform.clone() as Arc<dyn ReminderPlatform>);
    let handle = tokio::spawn(async move { gateway.request_access().await });
    settle().await;

    events_tx.send(Err(PlatformError::with_code("events restricted", 3))).unwrap();
    reminders_tx.send(Err(PlatformError::with_code("reminders restricted", 2))).unwrap();

    let outcome = handle.await.unwrap();
    assert!(!outcome.reminders_granted);
    assert!(!outcome.events_granted);
    match outcome.error {
        Some(AuthorizationError::Platform { scope, source }) => {
            assert_eq!(scope, AccessScope::Reminders);
            assert_eq!(source.code, Some(2));
        }
        other => panic!("expected platform error, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn silent_scope_times_out_as_denied() {
    let (platform, _fetches) = GatedPlatform::new();
    // Held but never answered.
    let _events_tx = platform.gate_access(AccessScope::Events);

    let gateway = PermissionGateway::with_timeout(
        platform.clone() as Arc<dyn ReminderPlatform>,
        Duration::from_secs(5),
    );
    let outcome = gateway.request_access().await;

    assert!(outcome.reminders_granted);
    assert!(!outcome.events_granted);
    assert_eq!(
        outcome.error,
        Some(AuthorizationError::TimedOut {
            scope: AccessScope::Events,
            secs: 5
        })
    );
}
