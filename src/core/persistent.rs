//! Observable single-value container with write-through persistence.
//!
//! A `PersistentStore<T>` starts with a caller-supplied default, loads the
//! stored value for its key in the background, and queues a write to the
//! backing `KeyValueStore` on every `set`.
//!
//! The write queue holds one slot: while a write is in flight, newer values
//! replace each other and only the latest is written next. Writes for one
//! container never overlap.
//!
//! The initial load is not ordered against early `set` calls. If the load
//! resolves after a `set`, the loaded value replaces it in memory and storage
//! keeps the earlier write until the next `set`.

use crate::db::adapter::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::Keyed;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Holding the default; the initial load has not finished.
    Uninitialized,
    /// The initial load finished, whether or not it found a value.
    Synchronized,
}

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    observers: Vec<(u64, Observer<T>)>,
    next_observer: u64,
}

/// Outcome of the most recent completed write.
#[derive(Debug, Clone, Default)]
struct Persisted {
    seq: u64,
    error: Option<String>,
}

struct Shared<T> {
    key: String,
    inner: Mutex<Inner<T>>,
    state: watch::Sender<SyncState>,
    queue: watch::Sender<Option<(u64, Value)>>,
    requested: AtomicU64,
    persisted: watch::Sender<Persisted>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the value and run `while_locked` under the same lock, then
    /// call every observer with no lock held.
    fn replace_and_notify(&self, value: T, while_locked: impl FnOnce())
    where
        T: Clone,
    {
        let (snapshot, observers) = {
            let mut inner = self.lock();
            inner.value = value;
            while_locked();
            let observers: Vec<Observer<T>> =
                inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (inner.value.clone(), observers)
        };
        for observer in observers {
            observer(&snapshot);
        }
    }

    /// Publish the outcome of write `seq`. Older outcomes never replace newer ones.
    fn record_outcome(&self, seq: u64, error: Option<String>) {
        self.persisted.send_if_modified(|current| {
            if seq <= current.seq {
                return false;
            }
            *current = Persisted { seq, error };
            true
        });
    }
}

/// Reactive container for one key. Cheap to clone; clones share state.
pub struct PersistentStore<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for PersistentStore<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> PersistentStore<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Create the container holding `default` and start loading `key`.
    ///
    /// Returns immediately. Must be called from within a tokio runtime; the
    /// load task and the writer task are spawned on it.
    pub fn new(
        adapter: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        default: T,
    ) -> AppResult<Self> {
        let handle = Handle::try_current().map_err(|e| {
            AppError::Other(format!("persistent store needs a tokio runtime: {e}"))
        })?;
        let key = key.into();

        let (state, _) = watch::channel(SyncState::Uninitialized);
        let (queue, queue_rx) = watch::channel(None);
        let (persisted, _) = watch::channel(Persisted::default());

        let shared = Arc::new(Shared {
            key: key.clone(),
            inner: Mutex::new(Inner {
                value: default,
                observers: Vec::new(),
                next_observer: 0,
            }),
            state,
            queue,
            requested: AtomicU64::new(0),
            persisted,
        });

        handle.spawn(run_load(Arc::clone(&adapter), Arc::clone(&shared)));
        handle.spawn(run_writer(adapter, key, queue_rx, Arc::downgrade(&shared)));

        Ok(Self { shared })
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn state(&self) -> SyncState {
        *self.shared.state.borrow()
    }

    /// Wait until the initial load has finished.
    pub async fn ready(&self) {
        let mut rx = self.shared.state.subscribe();
        // The sender lives in `shared`, which `self` keeps alive.
        let _ = rx.wait_for(|s| *s == SyncState::Synchronized).await;
    }

    pub fn get(&self) -> T {
        self.shared.lock().value.clone()
    }

    /// Replace the value, queue the write, notify observers.
    ///
    /// The write is queued before any observer runs, so a `set` made from
    /// inside an observer is queued after this one and is the one stored.
    /// A value that cannot be serialized is kept in memory and its failure
    /// is reported by `flush`.
    pub fn set(&self, value: T) {
        let payload = serde_json::to_value(&value);
        let shared = &self.shared;

        shared.replace_and_notify(value, || {
            let seq = shared.requested.fetch_add(1, Ordering::SeqCst) + 1;
            match payload {
                Ok(payload) => {
                    shared.queue.send_replace(Some((seq, payload)));
                }
                Err(e) => {
                    warn!(key = %shared.key, error = %e, "value not serializable, write skipped");
                    shared.record_outcome(seq, Some(format!("value not serializable: {e}")));
                }
            }
        });
    }

    /// Apply `f` to a copy of the current value, then `set` the result.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Run a mutation on the value wrapped with this container's key.
    ///
    /// The result is only `set` (and persisted) when `f` returns `true`.
    pub fn apply_keyed<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Keyed<T>) -> bool,
    {
        let mut keyed = Keyed::new(self.key(), self.get());
        if !f(&mut keyed) {
            return false;
        }
        self.set(keyed.into_inner());
        true
    }

    /// Register an observer. It is called right away with the current value
    /// and then after every change, until the returned guard is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer: Observer<T> = Arc::new(observer);
        let (id, current) = {
            let mut inner = self.shared.lock();
            let id = inner.next_observer;
            inner.next_observer += 1;
            inner.observers.push((id, Arc::clone(&observer)));
            (id, inner.value.clone())
        };
        observer(&current);

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.lock().observers.retain(|(oid, _)| *oid != id);
                }
            })),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.shared.lock().observers.len()
    }

    /// True while a value newer than the last completed write is queued or in flight.
    pub fn pending_writes(&self) -> bool {
        self.shared.requested.load(Ordering::SeqCst) > self.shared.persisted.borrow().seq
    }

    /// Error of the most recent completed write, if it failed.
    pub fn last_write_error(&self) -> Option<String> {
        self.shared.persisted.borrow().error.clone()
    }

    /// Wait until the latest value set so far has been written.
    ///
    /// Returns the storage error when that write failed.
    pub async fn flush(&self) -> AppResult<()> {
        let target = self.shared.requested.load(Ordering::SeqCst);
        if target == 0 {
            return Ok(());
        }

        let mut rx = self.shared.persisted.subscribe();
        let done = rx
            .wait_for(|p| p.seq >= target)
            .await
            .map_err(|_| AppError::Storage(format!("writer for {} stopped", self.shared.key)))?;

        match &done.error {
            Some(msg) => Err(AppError::Storage(msg.clone())),
            None => Ok(()),
        }
    }
}

async fn run_load<T>(adapter: Arc<dyn KeyValueStore>, shared: Arc<Shared<T>>)
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    match adapter.get(&shared.key).await {
        Ok(Some(raw)) => match serde_json::from_value::<T>(raw) {
            Ok(value) => {
                debug!(key = %shared.key, "loaded stored value");
                shared.replace_and_notify(value, || {});
                shared.state.send_replace(SyncState::Synchronized);
                return;
            }
            Err(e) => {
                warn!(key = %shared.key, error = %e, "stored value undecodable, keeping default")
            }
        },
        Ok(None) => debug!(key = %shared.key, "nothing stored, keeping default"),
        Err(e) => warn!(key = %shared.key, error = %e, "load failed, keeping default"),
    }
    shared.state.send_replace(SyncState::Synchronized);
}

/// Drains the single-slot queue until every container handle is gone.
async fn run_writer<T>(
    adapter: Arc<dyn KeyValueStore>,
    key: String,
    mut queue: watch::Receiver<Option<(u64, Value)>>,
    shared: Weak<Shared<T>>,
) {
    while queue.changed().await.is_ok() {
        let Some((seq, payload)) = queue.borrow_and_update().clone() else {
            continue;
        };

        let error = match adapter.set(&key, payload).await {
            Ok(()) => {
                debug!(%key, seq, "value persisted");
                None
            }
            Err(e) => {
                warn!(%key, seq, error = %e, "write failed");
                Some(e.to_string())
            }
        };

        match shared.upgrade() {
            Some(shared) => shared.record_outcome(seq, error),
            None => break,
        }
    }
}

/// Observer registration guard. Dropping it detaches the observer.
#[must_use = "dropping the subscription detaches the observer immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}
