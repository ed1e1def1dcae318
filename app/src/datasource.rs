//! FILENAME: app/src/datasource.rs
//! PURPOSE: Realtime data source - fetch a collection, cache the snapshot,
//! refetch on every change notification.
//! CONTEXT: Each consumer owns an independent subscription: its own channel
//! identity, its own cached snapshot, its own background task. Consumers
//! observe `None` until the first fetch resolves. A fetch failure logs and
//! keeps the previous snapshot (stale-but-available over crash). Requires a
//! running Tokio runtime.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use engine::{Record, StaffCategory};

use crate::config::BackendConfig;
use crate::remote::{ChangeChannel, ChannelHandle, RecordStore, StoreError};
use crate::services::{
    ApplicationService, FactoryService, ResumeService, StaffService,
};

// ============================================================================
// REALTIME QUERY
// ============================================================================

/// A live subscription to one collection-shaped query.
///
/// Dropping the query tears the subscription down: the liveness flag is
/// cleared (an in-flight fetch discards its result instead of committing),
/// the change channel is released, and the background task is aborted.
pub struct RealtimeQuery<T> {
    receiver: watch::Receiver<Option<T>>,
    alive: Arc<AtomicBool>,
    handle: Option<ChannelHandle>,
    store: Option<Arc<dyn RecordStore>>,
    task: Option<JoinHandle<()>>,
    /// Keeps the unconfigured-backend query permanently pending instead of
    /// closing the value stream.
    _idle_sender: Option<watch::Sender<Option<T>>>,
}

impl<T: Clone + Send + Sync + 'static> RealtimeQuery<T> {
    /// Subscribes to `collection` on `store`, using `fetch` to pull the
    /// full result on start and after every change event.
    ///
    /// With an unconfigured backend the query degrades to a permanent
    /// `None`: no task, no channel, no error.
    pub fn subscribe<F, Fut>(
        store: Arc<dyn RecordStore>,
        config: &BackendConfig,
        collection: &str,
        fetch: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let (sender, receiver) = watch::channel(None);
        let alive = Arc::new(AtomicBool::new(true));

        if !config.is_configured() {
            return RealtimeQuery {
                receiver,
                alive,
                handle: None,
                store: None,
                task: None,
                _idle_sender: Some(sender),
            };
        }

        let channel = store.open_channel(collection);
        let handle = channel.handle.clone();
        let task = tokio::spawn(run_query(
            channel,
            sender,
            fetch,
            alive.clone(),
            collection.to_string(),
        ));

        RealtimeQuery {
            receiver,
            alive,
            handle: Some(handle),
            store: Some(store),
            task: Some(task),
            _idle_sender: None,
        }
    }

    /// The latest cached snapshot, `None` while loading (or degraded).
    pub fn current(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next snapshot replacement. Returns `false` once the
    /// subscription can no longer produce values.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// The channel identity, `None` in degraded mode.
    pub fn channel(&self) -> Option<&ChannelHandle> {
        self.handle.as_ref()
    }
}

impl<T> Drop for RealtimeQuery<T> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if let Some(store) = &self.store {
                store.close_channel(&handle);
            }
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_query<T, F, Fut>(
    mut channel: ChangeChannel,
    sender: watch::Sender<Option<T>>,
    fetch: F,
    alive: Arc<AtomicBool>,
    collection: String,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, StoreError>> + Send,
{
    refetch(&sender, &fetch, &alive, &collection).await;
    // Events are processed in delivery order; each one triggers its own
    // full refetch, last writer wins on the snapshot.
    while let Some(_event) = channel.receiver.recv().await {
        if !alive.load(Ordering::SeqCst) {
            break;
        }
        refetch(&sender, &fetch, &alive, &collection).await;
    }
}

async fn refetch<T, F, Fut>(
    sender: &watch::Sender<Option<T>>,
    fetch: &F,
    alive: &AtomicBool,
    collection: &str,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    match fetch().await {
        Ok(value) => {
            // A consumer disposed mid-flight must never observe this result
            if alive.load(Ordering::SeqCst) {
                let _ = sender.send(Some(value));
            }
        }
        Err(err) => {
            log::error!("fetch for {} failed: {}", collection, err);
        }
    }
}

// ============================================================================
// COLLECTION SUBSCRIPTIONS
// ============================================================================

/// Live staff list, optionally narrowed to one category.
pub fn staff_records(
    store: Arc<dyn RecordStore>,
    config: &BackendConfig,
    category: Option<StaffCategory>,
) -> RealtimeQuery<Vec<Record>> {
    let service = StaffService::new(store.clone());
    RealtimeQuery::subscribe(store, config, "staff", move || {
        let service = service.clone();
        async move { service.get_all(category).await }
    })
}

/// Live staff head-count, optionally narrowed to one category.
pub fn staff_count(
    store: Arc<dyn RecordStore>,
    config: &BackendConfig,
    category: Option<StaffCategory>,
) -> RealtimeQuery<usize> {
    let service = StaffService::new(store.clone());
    RealtimeQuery::subscribe(store, config, "staff", move || {
        let service = service.clone();
        async move { service.count(category).await }
    })
}

/// Live resume list.
pub fn resume_records(
    store: Arc<dyn RecordStore>,
    config: &BackendConfig,
) -> RealtimeQuery<Vec<Record>> {
    let service = ResumeService::new(store.clone());
    RealtimeQuery::subscribe(store, config, "resumes", move || {
        let service = service.clone();
        async move { service.get_all().await }
    })
}

/// Live hiring-application list.
pub fn application_records(
    store: Arc<dyn RecordStore>,
    config: &BackendConfig,
) -> RealtimeQuery<Vec<Record>> {
    let service = ApplicationService::new(store.clone());
    RealtimeQuery::subscribe(store, config, "applications", move || {
        let service = service.clone();
        async move { service.get_all().await }
    })
}

/// Live factory list.
pub fn factory_records(
    store: Arc<dyn RecordStore>,
    config: &BackendConfig,
) -> RealtimeQuery<Vec<Record>> {
    let service = FactoryService::new(store.clone());
    RealtimeQuery::subscribe(store, config, "factories", move || {
        let service = service.clone();
        async move { service.get_all().await }
    })
}
