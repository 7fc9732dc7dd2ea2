mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{fixed_clock, local, reminder, GatedPlatform};
use taskdeck::calendar::{AccessScope, InMemoryPlatform, PlatformError, ReminderPlatform};
use taskdeck::{
    FetchError, PermissionGateway, ReminderListState, ReminderStore, ReminderSyncController,
    SyncPhase, ToggleOutcome,
};

fn controller_for(platform: Arc<dyn ReminderPlatform>) -> ReminderSyncController {
    ReminderSyncController::new(
        PermissionGateway::new(platform.clone()),
        ReminderStore::new(platform, fixed_clock()),
    )
}

fn seeded() -> Arc<InMemoryPlatform> {
    let platform = Arc::new(InMemoryPlatform::new());
    platform.add_reminder(reminder("a", local(2024, 3, 15, 8, 0, 0)));
    platform.add_reminder(reminder("b", local(2024, 3, 15, 12, 0, 0)));
    platform.add_reminder(reminder("c", local(2024, 3, 15, 18, 0, 0)));
    platform
}

fn ids(state: &ReminderListState) -> Vec<String> {
    state.reminders().iter().map(|r| r.id.clone()).collect()
}

#[tokio::test]
async fn fetch_today_keeps_only_todays_window() {
    let platform = Arc::new(InMemoryPlatform::new());
    platform.add_reminder(reminder("yesterday-late", local(2024, 3, 14, 23, 59, 59)));
    platform.add_reminder(reminder("midnight", local(2024, 3, 15, 0, 0, 0)));
    platform.add_reminder(reminder("late", local(2024, 3, 15, 23, 59, 59)));
    platform.add_reminder(reminder("tomorrow", local(2024, 3, 16, 0, 0, 0)));

    let store = ReminderStore::new(platform, fixed_clock());
    let fetched = store.fetch_today().await.unwrap();

    let ids: Vec<_> = fetched.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["midnight", "late"]);
}

#[tokio::test]
async fn fetch_today_on_empty_store_is_empty_not_error() {
    let store = ReminderStore::new(Arc::new(InMemoryPlatform::new()), fixed_clock());
    let fetched = store.fetch_today().await.unwrap();
    assert!(fetched.is_empty());
}

#[tokio::test]
async fn fetch_failure_is_reported_not_swallowed() {
    let platform = seeded();
    platform.fail_fetches(Some(PlatformError::new("store offline")));

    let store = ReminderStore::new(platform, fixed_clock());
    let err = store.fetch_today().await.unwrap_err();
    assert!(matches!(err, FetchError::Platform(_)));
}

#[tokio::test]
async fn update_failure_names_the_reminder() {
    let platform = seeded();
    platform.fail_writes(Some(PlatformError::new("permission revoked")));

    let store = ReminderStore::new(platform.clone(), fixed_clock());
    let record = platform.reminders()[0].clone();
    let err = store.update(&record, true).await.unwrap_err();
    assert_eq!(err.reminder_id, "a");
    assert!(err.to_string().contains("permission revoked"));
}

#[tokio::test]
async fn granted_access_loads_todays_list() {
    let controller = controller_for(seeded());
    assert_eq!(controller.phase(), SyncPhase::Uninitialized);
    assert_eq!(controller.list(), ReminderListState::Loading);

    let outcome = controller.initialize().await;

    assert!(outcome.reminders_granted);
    assert_eq!(controller.phase(), SyncPhase::Ready);
    assert_eq!(ids(&controller.list()), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn denied_reminders_publish_denied_state() {
    let platform = seeded();
    platform.set_grant(AccessScope::Reminders, false);
    let controller = controller_for(platform);

    controller.initialize().await;

    assert_eq!(controller.phase(), SyncPhase::AccessDenied);
    assert_eq!(controller.list(), ReminderListState::Denied);

    // Manual refresh does not bypass the denial.
    assert_eq!(controller.refresh().await, ReminderListState::Denied);
}

#[tokio::test]
async fn events_denial_does_not_gate_reminders() {
    let platform = seeded();
    platform.set_grant(AccessScope::Events, false);
    let controller = controller_for(platform);

    let outcome = controller.initialize().await;

    assert!(!outcome.events_granted);
    assert_eq!(controller.phase(), SyncPhase::Ready);
    assert_eq!(controller.list().reminders().len(), 3);
}

#[tokio::test]
async fn empty_day_is_distinct_from_denied() {
    let controller = controller_for(Arc::new(InMemoryPlatform::new()));
    controller.initialize().await;
    assert_eq!(controller.list(), ReminderListState::Empty);
}

#[tokio::test]
async fn second_initialize_reuses_first_outcome() {
    let platform = seeded();
    let controller = controller_for(platform.clone());
    let first = controller.initialize().await;

    platform.set_grant(AccessScope::Reminders, false);
    let second = controller.initialize().await;

    assert_eq!(first, second);
    assert_eq!(controller.phase(), SyncPhase::Ready);
}

#[tokio::test]
async fn later_fetch_failure_does_not_regress_to_denied() {
    let platform = seeded();
    let controller = controller_for(platform.clone());
    controller.initialize().await;

    platform.fail_fetches(Some(PlatformError::new("access revoked")));
    let state = controller.refresh().await;

    assert!(matches!(state, ReminderListState::Failed(ref msg) if msg.contains("access revoked")));
    assert_eq!(controller.phase(), SyncPhase::Ready);
}

#[tokio::test]
async fn toggle_completes_and_refetch_drops_the_record() {
    let platform = seeded();
    let controller = controller_for(platform.clone());
    controller.initialize().await;

    let target = controller.list().reminders()[1].clone();
    assert!(!target.is_completed);

    assert_eq!(controller.toggle_completion(&target).await, ToggleOutcome::Applied);

    assert_eq!(ids(&controller.list()), vec!["a", "c"]);
    let stored = platform.reminders().into_iter().find(|r| r.id == "b").unwrap();
    assert!(stored.is_completed);
}

#[tokio::test]
async fn rejected_toggle_leaves_list_untouched() {
    let platform = seeded();
    let controller = controller_for(platform.clone());
    controller.initialize().await;
    let before = controller.list();

    platform.fail_writes(Some(PlatformError::new("record deleted")));
    let target = before.reminders()[0].clone();
    let outcome = controller.toggle_completion(&target).await;

    assert!(matches!(outcome, ToggleOutcome::Rejected(ref msg) if msg.contains("record deleted")));
    assert_eq!(controller.list(), before);
    assert_eq!(controller.phase(), SyncPhase::Ready);
    assert_eq!(platform.write_count(), 0);
}

#[tokio::test]
async fn subscribers_see_whole_snapshots() {
    let platform = seeded();
    let controller = controller_for(platform);
    let mut rx = controller.subscribe();

    controller.initialize().await;

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(ids(&seen), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn overlapping_toggles_last_finished_fetch_wins() {
    let (platform, mut fetches) = GatedPlatform::new();
    platform.inner.add_reminder(reminder("a", local(2024, 3, 15, 8, 0, 0)));
    platform.inner.add_reminder(reminder("b", local(2024, 3, 15, 12, 0, 0)));
    platform.inner.add_reminder(reminder("c", local(2024, 3, 15, 18, 0, 0)));

    let controller = Arc::new(controller_for(platform.clone()));
    controller.initialize().await;
    let initial = fetches.recv().await.unwrap();
    assert_eq!(initial.len(), 3);

    let release_first = platform.gate_fetch();
    let release_second = platform.gate_fetch();

    let a = controller.list().reminders()[0].clone();
    let b = controller.list().reminders()[1].clone();

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.toggle_completion(&a).await })
    };
    // First toggle's refetch has taken its snapshot: a is gone, b still open.
    let first_snapshot = fetches.recv().await.unwrap();
    let first_ids: Vec<_> = first_snapshot.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(first_ids, vec!["b", "c"]);

    let second = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.toggle_completion(&b).await })
    };
    let second_snapshot = fetches.recv().await.unwrap();
    assert_eq!(second_snapshot.len(), 1);

    release_second.send(()).unwrap();
    assert_eq!(second.await.unwrap(), ToggleOutcome::Applied);
    assert_eq!(ids(&controller.list()), vec!["c"]);
    assert_eq!(controller.phase(), SyncPhase::Refreshing);

    release_first.send(()).unwrap();
    assert_eq!(first.await.unwrap(), ToggleOutcome::Applied);

    // The stale snapshot finished last, so it is what stays published.
    assert_eq!(controller.list(), ReminderListState::Loaded(first_snapshot));
    assert_eq!(controller.phase(), SyncPhase::Ready);
}

#[tokio::test]
async fn start_requests_access_without_being_awaited() {
    let platform: Arc<dyn ReminderPlatform> = seeded();
    let (controller, handle) =
        ReminderSyncController::start(platform, fixed_clock(), Duration::from_secs(1));

    let outcome = handle.await.unwrap();

    assert!(outcome.fully_granted());
    assert_eq!(controller.access(), Some(outcome));
    assert_eq!(controller.list().reminders().len(), 3);
}
