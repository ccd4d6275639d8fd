//! Time-bounded local cache for search results.
//!
//! Entries are stored as `{"data": [...], "timestamp": <epoch millis>}` under
//! `{domain}_search_{normalized}` keys. Freshness is checked on read; an
//! expired entry is deleted by the read that finds it and there is no sweep.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::constants::cache::SEARCH_TTL;
use crate::db::Store;
use crate::models::Record;
use crate::services::search::StageError;

/// String key/value storage behind the cache.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct SqliteKeyValueStore {
    store: Store,
}

impl SqliteKeyValueStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.store.kv_repo().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.store.kv_repo().set(key, value).await
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.store.kv_repo().delete(key).await
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: Vec<Record>,
    timestamp: i64,
}

#[derive(Clone)]
pub struct SearchCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl SearchCache {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ttl(store, SEARCH_TTL)
    }

    #[must_use]
    pub fn with_ttl(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<Vec<Record>> {
        self.get_at(key, Utc::now()).await
    }

    /// Returns the payload while `now - timestamp < ttl`. Any failure is
    /// logged and reported as a miss.
    pub async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<Record>> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                record_failure("read", key, &e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                record_failure("decode", key, &e.into());
                self.evict(key).await;
                return None;
            }
        };

        let age_ms = now.timestamp_millis().saturating_sub(entry.timestamp);
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if age_ms >= ttl_ms {
            debug!(key, age_ms, "Cache entry expired");
            self.evict(key).await;
            return None;
        }

        Some(entry.data)
    }

    pub async fn set(&self, key: &str, payload: &[Record]) {
        self.set_at(key, payload, Utc::now()).await;
    }

    /// Overwrites the entry. Failures are logged and swallowed.
    pub async fn set_at(&self, key: &str, payload: &[Record], now: DateTime<Utc>) {
        let entry = CacheEntry {
            data: payload.to_vec(),
            timestamp: now.timestamp_millis(),
        };

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                record_failure("encode", key, &e.into());
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw).await {
            record_failure("write", key, &e);
        }
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            record_failure("delete", key, &e);
        }
    }
}

fn record_failure(op: &'static str, key: &str, error: &anyhow::Error) {
    let stage = StageError::CacheUnavailable;
    warn!(stage = stage.stage(), op, key, error = %error, "{stage}");
    stage.record();
}
