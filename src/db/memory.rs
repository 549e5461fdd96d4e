//! In-memory `KeyValueStore`, used by tests and as a scratch backend.

use super::adapter::KeyValueStore;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// HashMap-backed store. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    read_delay: Option<Duration>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `get` reads immediately but answers only after `delay`.
    /// Lets tests hold a container in its uninitialized state.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Make every subsequent `set` fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Direct read without the artificial delay.
    pub async fn snapshot(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let value = self.entries.read().await.get(key).cloned();
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("write rejected for key {key}")));
        }
        self.entries.write().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
