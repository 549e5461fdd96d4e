//! Typed, keyed view over a `KeyValueStore`.

use super::adapter::KeyValueStore;
use crate::errors::AppResult;
use crate::models::Keyed;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

/// Reads payloads as `Keyed<T>` and writes `Keyed<T>` back under its own key.
///
/// The stored payload never contains the key; it is attached on load.
pub struct KeyedStore<T> {
    adapter: Arc<dyn KeyValueStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for KeyedStore<T> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            _marker: PhantomData,
        }
    }
}

impl<T> KeyedStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(adapter: Arc<dyn KeyValueStore>) -> Self {
        Self {
            adapter,
            _marker: PhantomData,
        }
    }

    pub fn adapter(&self) -> &Arc<dyn KeyValueStore> {
        &self.adapter
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<Keyed<T>>> {
        match self.adapter.get(key).await? {
            Some(raw) => {
                let value: T = serde_json::from_value(raw)?;
                Ok(Some(Keyed::new(key, value)))
            }
            None => Ok(None),
        }
    }

    pub async fn set(&self, entity: &Keyed<T>) -> AppResult<()> {
        let payload = serde_json::to_value(entity.value())?;
        self.adapter.set(entity.key(), payload).await
    }

    pub async fn delete(&self, entity: &Keyed<T>) -> AppResult<()> {
        self.adapter.delete(entity.key()).await
    }

    pub async fn delete_key(&self, key: &str) -> AppResult<()> {
        self.adapter.delete(key).await
    }

    pub async fn keys(&self) -> AppResult<Vec<String>> {
        self.adapter.keys().await
    }

    /// Every decodable entry, sorted by key. Undecodable payloads are skipped
    /// with a warning.
    pub async fn load_all(&self) -> AppResult<Vec<Keyed<T>>> {
        let mut keys = self.keys().await?;
        keys.sort();

        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            match self.get(&key).await {
                Ok(Some(entity)) => out.push(entity),
                Ok(None) => {}
                Err(e) => warn!(%key, error = %e, "skipping undecodable entry"),
            }
        }
        Ok(out)
    }
}
