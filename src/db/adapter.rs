//! Durable key-value storage contract.

use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;

/// Opaque asynchronous key-value service.
///
/// - `get` returns `None` for a key that was never written.
/// - `set` overwrites unconditionally (no versioning, last writer wins).
/// - `delete` is idempotent.
/// - `keys` order is unspecified.
///
/// Ordering is only guaranteed per key. Implementations surface their own
/// failures as `AppError`; callers decide whether to retry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;
    async fn delete(&self, key: &str) -> AppResult<()>;
    async fn keys(&self) -> AppResult<Vec<String>>;
}
