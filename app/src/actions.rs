//! FILENAME: app/src/actions.rs
//! PURPOSE: Bulk record operations.
//! CONTEXT: Bulk delete is a best-effort fan-out, not a transaction: every
//! id is attempted, each failure is logged and reported individually, and
//! the operation always runs to completion. Ids that vanished remotely in
//! the meantime simply fail their own delete; the next realtime refetch
//! reconciles the visible list.

use crate::remote::{RecordStore, StoreError};

/// One failed delete within a bulk operation.
#[derive(Debug)]
pub struct BulkDeleteFailure {
    pub id: String,
    pub error: StoreError,
}

/// Result of a bulk delete.
#[derive(Debug, Default)]
pub struct BulkDeleteOutcome {
    pub attempted: usize,
    pub deleted: usize,
    pub failures: Vec<BulkDeleteFailure>,
}

impl BulkDeleteOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Deletes the given ids from a collection, one by one.
pub async fn delete_records(
    store: &dyn RecordStore,
    collection: &str,
    ids: &[String],
) -> BulkDeleteOutcome {
    let mut outcome = BulkDeleteOutcome {
        attempted: ids.len(),
        ..Default::default()
    };
    for id in ids {
        match store.delete(collection, id).await {
            Ok(()) => outcome.deleted += 1,
            Err(error) => {
                log::warn!("bulk delete: {}/{} failed: {}", collection, id, error);
                outcome.failures.push(BulkDeleteFailure {
                    id: id.clone(),
                    error,
                });
            }
        }
    }
    outcome
}
