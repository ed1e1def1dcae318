//! FILENAME: app/src/memory.rs
//! PURPOSE: In-process record store with change-event fan-out.
//! CONTEXT: Serves the offline mode (no backend configured but local data
//! imported) and the test suite. Behaves like the hosted store: uuid
//! identities, creation timestamps, newest-first listings, and change
//! events delivered to every open channel of the touched collection.

use async_trait::async_trait;
use chrono::Utc;
use engine::Record;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::remote::{
    ChangeChannel, ChangeEvent, ChangeKind, ChannelHandle, RecordStore, StoreError,
};

/// In-memory collections plus the channel registry.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    channels: Mutex<HashMap<u64, (String, mpsc::UnboundedSender<ChangeEvent>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-loads records without firing change events, for imports and
    /// test fixtures. Records keep their given ids.
    pub fn seed(&self, collection: &str, records: Vec<Record>) {
        let mut guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        guard.entry(collection.to_string()).or_default().extend(records);
    }

    /// Number of currently open change channels (teardown visibility).
    pub fn open_channel_count(&self) -> usize {
        self.channels.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn emit(&self, collection: &str, kind: ChangeKind, id: Option<String>) {
        let event = ChangeEvent {
            collection: collection.to_string(),
            kind,
            id,
        };
        let mut guard = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        guard.retain(|_, (chan_collection, sender)| {
            if chan_collection.as_str() != collection {
                return true;
            }
            // A receiver dropped without closing its handle is pruned here
            sender.send(event.clone()).is_ok()
        });
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let mut records = guard.get(collection).cloned().unwrap_or_default();
        // Newest first, matching the hosted store's created_at ordering;
        // untimestamped records keep insertion order at the end
        records.sort_by(|a, b| {
            match (a.number("createdAt"), b.number("createdAt")) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
            }
        });
        Ok(records)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        let guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id() == id).cloned()))
    }

    async fn create(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        let mut record = record;
        if record.id().is_empty() {
            record.set("id", Uuid::new_v4().to_string());
        }
        if record.value("createdAt").is_empty() {
            record.set("createdAt", Utc::now().timestamp_millis());
        }
        let id = record.id();
        {
            let mut guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            guard
                .entry(collection.to_string())
                .or_default()
                .push(record.clone());
        }
        self.emit(collection, ChangeKind::Insert, Some(id));
        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Record,
    ) -> Result<Record, StoreError> {
        let updated = {
            let mut guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            let records = guard
                .get_mut(collection)
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            record.merge(&patch);
            record.clone()
        };
        self.emit(collection, ChangeKind::Update, Some(id.to_string()));
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let removed = {
            let mut guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            match guard.get_mut(collection) {
                Some(records) => {
                    let before = records.len();
                    records.retain(|r| r.id() != id);
                    records.len() < before
                }
                None => false,
            }
        };
        if !removed {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        self.emit(collection, ChangeKind::Delete, Some(id.to_string()));
        Ok(())
    }

    fn open_channel(&self, collection: &str) -> ChangeChannel {
        let handle = ChannelHandle::new(collection);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle.id(), (collection.to_string(), sender));
        ChangeChannel { handle, receiver }
    }

    fn close_channel(&self, handle: &ChannelHandle) {
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(name: &str) -> Record {
        Record::new().with("fullName", name).with("category", "dispatch")
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let created = store.create("staff", staff("田中")).await;
        assert!(created.is_ok());
        if let Ok(record) = created {
            assert!(!record.id().is_empty());
            assert!(record.number("createdAt").is_some());
        }
    }

    #[tokio::test]
    async fn test_get_all_returns_newest_first() {
        let store = MemoryStore::new();
        let a = store
            .create("staff", staff("first").with("createdAt", 100))
            .await;
        let b = store
            .create("staff", staff("second").with("createdAt", 200))
            .await;
        assert!(a.is_ok() && b.is_ok());

        let all = store.get_all("staff").await;
        assert!(all.is_ok());
        if let Ok(records) = all {
            assert_eq!(records[0].text("fullName"), "second");
            assert_eq!(records[1].text("fullName"), "first");
        }
    }

    #[tokio::test]
    async fn test_update_merges_and_delete_removes() {
        let store = MemoryStore::new();
        let created = store.create("staff", staff("田中")).await;
        assert!(created.is_ok());
        let id = created.map(|r| r.id()).unwrap_or_default();

        let patch = Record::new().with("hourlyWage", 1500);
        let updated = store.update("staff", &id, patch).await;
        assert!(updated.is_ok());
        if let Ok(record) = updated {
            assert_eq!(record.number("hourlyWage"), Some(1500.0));
            assert_eq!(record.text("fullName"), "田中");
        }

        assert!(store.delete("staff", &id).await.is_ok());
        let gone = store.get_by_id("staff", &id).await;
        assert!(matches!(gone, Ok(None)));
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let result = store.delete("staff", "no-such-id").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_events_reach_only_matching_collection_channels() {
        let store = MemoryStore::new();
        let mut staff_channel = store.open_channel("staff");
        let mut resume_channel = store.open_channel("resumes");

        let created = store.create("staff", staff("田中")).await;
        assert!(created.is_ok());

        let event = staff_channel.receiver.try_recv();
        assert!(event.is_ok());
        if let Ok(event) = event {
            assert_eq!(event.collection, "staff");
            assert_eq!(event.kind, ChangeKind::Insert);
        }
        assert!(resume_channel.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_channel_stops_delivery() {
        let store = MemoryStore::new();
        let channel = store.open_channel("staff");
        assert_eq!(store.open_channel_count(), 1);

        store.close_channel(&channel.handle);
        assert_eq!(store.open_channel_count(), 0);
    }
}
