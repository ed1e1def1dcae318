//! FILENAME: app/src/remote.rs
//! PURPOSE: The remote store contract - per-collection CRUD plus change
//! notification channels.
//! CONTEXT: Everything the data layer needs from a backend, expressed as an
//! async trait so shells can plug in a hosted store, the in-process store,
//! or a test double. Channel identity comes from a process-wide sequence so
//! two consumers subscribing to the same collection in the same tick can
//! never collide.

use async_trait::async_trait;
use engine::Record;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;

// ============================================================================
// CHANNEL IDENTITY
// ============================================================================

/// Global channel sequence counter.
/// Initialized once at process start, monotonic, never reset. Its only
/// purpose is uniqueness of channel identities across all consumers.
static CHANNEL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Next channel sequence number.
pub fn next_channel_seq() -> u64 {
    CHANNEL_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Identity of one change-notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHandle {
    id: u64,
    name: String,
}

impl ChannelHandle {
    /// Allocates a fresh handle for a collection, e.g. `staff-changes-7`.
    pub fn new(collection: &str) -> Self {
        let id = next_channel_seq();
        ChannelHandle {
            id,
            name: format!("{}-changes-{}", collection, id),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// CHANGE EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A change notification for a collection. Consumers refetch the whole
/// collection on any event, so the payload carries identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub collection: String,
    pub kind: ChangeKind,
    pub id: Option<String>,
}

/// An open change channel: its identity plus the event receiver.
pub struct ChangeChannel {
    pub handle: ChannelHandle,
    pub receiver: mpsc::UnboundedReceiver<ChangeEvent>,
}

// ============================================================================
// STORE ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("backend not configured")]
    NotConfigured,

    #[error("backend error: {0}")]
    Backend(String),
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// Per-collection CRUD and change subscription.
///
/// `get_all` pulls the entire collection - there is no incremental paging
/// against the remote store; record counts are bounded and a full pull per
/// change keeps consistency reasoning simple.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError>;

    /// Inserts a record, filling in identity fields the caller omitted, and
    /// returns the stored form.
    async fn create(&self, collection: &str, record: Record) -> Result<Record, StoreError>;

    /// Merges `patch` into the record with the given id.
    async fn update(&self, collection: &str, id: &str, patch: Record)
        -> Result<Record, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Opens an independent change channel for a collection.
    fn open_channel(&self, collection: &str) -> ChangeChannel;

    /// Releases a channel. Closing an already-closed handle is a no-op.
    fn close_channel(&self, handle: &ChannelHandle);
}
