//! FILENAME: tests/test_actions.rs
//! Integration tests for bulk record operations.

mod common;

use common::{staff_record, TestHarness};
use meibo::{delete_records, RecordStore, StoreError};

#[tokio::test]
async fn test_bulk_delete_removes_every_id() {
    let harness = TestHarness::with_staff_fixture();
    let ids: Vec<String> = (0..5).map(|n| format!("S{:03}", n)).collect();

    let outcome = delete_records(harness.store.as_ref(), "staff", &ids).await;
    assert_eq!(outcome.attempted, 5);
    assert_eq!(outcome.deleted, 5);
    assert!(outcome.all_succeeded());

    let remaining = harness.store.get_all("staff").await;
    assert!(remaining.is_ok());
    if let Ok(records) = remaining {
        assert_eq!(records.len(), 45);
    }
}

#[tokio::test]
async fn test_partial_failure_still_completes_the_batch() {
    let harness = TestHarness::with_staff_fixture();
    let ids = vec![
        "S000".to_string(),
        "already-deleted".to_string(),
        "S001".to_string(),
    ];

    let outcome = delete_records(harness.store.as_ref(), "staff", &ids).await;
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.deleted, 2);
    assert!(!outcome.all_succeeded());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].id, "already-deleted");
    assert!(matches!(
        outcome.failures[0].error,
        StoreError::NotFound { .. }
    ));

    // The ids after the failing one were still attempted
    let gone = harness.store.get_by_id("staff", "S001").await;
    assert!(matches!(gone, Ok(None)));
}

#[tokio::test]
async fn test_empty_batch_is_a_no_op() {
    let harness = TestHarness::with_staff_fixture();
    let outcome = delete_records(harness.store.as_ref(), "staff", &[]).await;
    assert_eq!(outcome.attempted, 0);
    assert_eq!(outcome.deleted, 0);
    assert!(outcome.all_succeeded());
}

#[tokio::test]
async fn test_deletes_are_observable_to_subscribers() {
    let harness = TestHarness::with_staff_fixture();
    let mut query = meibo::staff_records(harness.store.clone(), &harness.config, None);

    let changed = tokio::time::timeout(std::time::Duration::from_secs(5), query.changed()).await;
    assert!(changed.is_ok());
    assert_eq!(query.current().map(|r| r.len()), Some(50));

    let ids = vec!["S000".to_string(), "S001".to_string()];
    let outcome = delete_records(harness.store.as_ref(), "staff", &ids).await;
    assert!(outcome.all_succeeded());

    // Two delete events, two refetches; wait until the snapshot settles
    let mut len = query.current().map(|r| r.len());
    for _ in 0..2 {
        let changed =
            tokio::time::timeout(std::time::Duration::from_secs(5), query.changed()).await;
        if changed.is_err() {
            break;
        }
        len = query.current().map(|r| r.len());
        if len == Some(48) {
            break;
        }
    }
    assert_eq!(len, Some(48));
}
