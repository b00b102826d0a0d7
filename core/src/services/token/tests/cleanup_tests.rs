//! Unit tests for the revocation cleanup service

use std::sync::Arc;

use chrono::{DateTime, Duration};

use crate::repositories::{MockRevocationStore, RevocationStore};
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{RevocationCleanupConfig, RevocationCleanupService};

fn setup(
    config: RevocationCleanupConfig,
) -> (
    Arc<RevocationCleanupService<MockRevocationStore>>,
    Arc<MockRevocationStore>,
    ManualClock,
) {
    let store = Arc::new(MockRevocationStore::new());
    let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let service = Arc::new(RevocationCleanupService::new(
        Arc::clone(&store),
        Arc::new(clock.clone()),
        config,
    ));
    (service, store, clock)
}

#[tokio::test]
async fn test_run_cleanup_purges_only_expired_entries() {
    let (service, store, clock) = setup(RevocationCleanupConfig::default());
    let now = clock.now();

    store.revoke("expired", now - Duration::minutes(5), now).await.unwrap();
    store.revoke("live", now + Duration::minutes(5), now).await.unwrap();

    let result = service.run_cleanup().await;

    assert!(result.is_success());
    assert_eq!(result.entries_purged, 1);
    assert!(!store.is_revoked("expired").await.unwrap());
    assert!(store.is_revoked("live").await.unwrap());
}

#[tokio::test]
async fn test_run_cleanup_uses_injected_clock() {
    let (service, store, clock) = setup(RevocationCleanupConfig::default());
    store.revoke("t1", clock.now() + Duration::minutes(5), clock.now()).await.unwrap();

    assert_eq!(service.run_cleanup().await.entries_purged, 0);

    clock.advance(Duration::minutes(6));
    assert_eq!(service.run_cleanup().await.entries_purged, 1);
}

#[tokio::test]
async fn test_run_cleanup_records_store_failure() {
    let (service, store, _) = setup(RevocationCleanupConfig::default());
    store.set_unavailable(true);

    let result = service.run_cleanup().await;

    assert!(!result.is_success());
    assert_eq!(result.entries_purged, 0);
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn test_disabled_service_does_not_start() {
    let config = RevocationCleanupConfig {
        enabled: false,
        ..RevocationCleanupConfig::default()
    };
    let (service, _, _) = setup(config);

    assert!(service.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_runs_on_schedule_and_survives_failures() {
    let (service, store, clock) = setup(RevocationCleanupConfig::default());
    let now = clock.now();
    store.revoke("t1", now - Duration::seconds(1), now).await.unwrap();

    let handle = Arc::clone(&service).start_background_task().unwrap();

    // First cycle fires immediately.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(store.count().await.unwrap(), 0);

    // A failing cycle is logged and the schedule continues.
    store.set_unavailable(true);
    tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
    store.set_unavailable(false);

    store.revoke("t2", now + Duration::minutes(1), clock.now()).await.unwrap();
    clock.advance(Duration::minutes(2));
    tokio::time::sleep(std::time::Duration::from_secs(3600)).await;

    assert_eq!(store.count().await.unwrap(), 0);
    assert!(!handle.is_finished());
    handle.abort();
}
