//! Shared per-query documents that outlive the local cache.
//!
//! Each normalized query owns one document per domain collection. Reads bump
//! a popularity counter in the background; writes merge results without
//! touching the counter.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::db::Store;
use crate::models::{Record, SearchDomain};
use crate::services::search::StageError;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub query: String,
    pub results: Vec<Record>,
    pub search_count: i64,
    pub timestamp: String,
    pub last_searched: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHit {
    pub results: Vec<Record>,
    /// Counter value once this read's increment lands.
    pub search_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularQuery {
    pub query: String,
    pub search_count: i64,
}

/// Remote-style document storage keyed by `(collection, document_id)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<StoredDocument>>;

    /// Merge write: sets `query`, `results` and `timestamp`, initialises the
    /// counter to 1 for new documents and leaves it alone otherwise.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        query: &str,
        results: &[Record],
    ) -> anyhow::Result<()>;

    /// Atomic `search_count + 1` and `last_searched = now`.
    async fn increment(&self, collection: &str, id: &str) -> anyhow::Result<()>;

    async fn most_searched(
        &self,
        collection: &str,
        limit: u64,
    ) -> anyhow::Result<Vec<PopularQuery>>;
}

#[derive(Clone)]
pub struct SeaOrmDocumentStore {
    store: Store,
}

impl SeaOrmDocumentStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<StoredDocument>> {
        let Some(row) = self.store.get_document(collection, id).await? else {
            return Ok(None);
        };

        Ok(Some(StoredDocument {
            results: serde_json::from_str(&row.results_json)?,
            query: row.query,
            search_count: row.search_count,
            timestamp: row.timestamp,
            last_searched: row.last_searched,
        }))
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        query: &str,
        results: &[Record],
    ) -> anyhow::Result<()> {
        let results_json = serde_json::to_string(results)?;
        self.store
            .document_repo()
            .upsert(collection, id, query, &results_json)
            .await
    }

    async fn increment(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        let affected = self.store.document_repo().record_hit(collection, id).await?;
        if affected == 0 {
            anyhow::bail!("document {collection}/{id} disappeared before increment");
        }
        Ok(())
    }

    async fn most_searched(
        &self,
        collection: &str,
        limit: u64,
    ) -> anyhow::Result<Vec<PopularQuery>> {
        let rows = self
            .store
            .document_repo()
            .most_searched(collection, limit)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| PopularQuery {
                query: m.query,
                search_count: m.search_count,
            })
            .collect())
    }
}

/// Degrading front for a [`DocumentStore`]: every storage error is logged
/// and turned into "absent".
pub struct DocumentAdapter {
    store: Arc<dyn DocumentStore>,
    pending: Mutex<JoinSet<()>>,
}

impl DocumentAdapter {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(JoinSet::new()),
        }
    }

    /// A document with no results counts as a miss. On a hit the counter
    /// increment is spawned and never awaited here.
    pub async fn read(&self, domain: SearchDomain, normalized: &str) -> Option<DocumentHit> {
        let collection = domain.collection();

        let doc = match self.store.get(collection, normalized).await {
            Ok(Some(doc)) => doc,
            Ok(None) => return None,
            Err(e) => {
                record_failure("read", collection, normalized, &e);
                return None;
            }
        };

        if doc.results.is_empty() {
            debug!(collection, id = normalized, "Document has no results");
            return None;
        }

        let store = Arc::clone(&self.store);
        let id = normalized.to_string();
        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            if let Err(e) = store.increment(collection, &id).await {
                record_failure("increment", collection, &id, &e);
            }
        });

        Some(DocumentHit {
            results: doc.results,
            search_count: doc.search_count.saturating_add(1),
        })
    }

    pub async fn write(&self, domain: SearchDomain, normalized: &str, results: &[Record]) {
        let collection = domain.collection();
        if let Err(e) = self
            .store
            .merge(collection, normalized, normalized, results)
            .await
        {
            record_failure("write", collection, normalized, &e);
        }
    }

    pub async fn most_searched(&self, domain: SearchDomain, limit: u64) -> Vec<PopularQuery> {
        let collection = domain.collection();
        match self.store.most_searched(collection, limit).await {
            Ok(list) => list,
            Err(e) => {
                record_failure("popular", collection, "*", &e);
                Vec::new()
            }
        }
    }

    /// Waits for every in-flight counter increment.
    pub async fn settle(&self) {
        let mut pending = self.pending.lock().await;
        while let Some(res) = pending.join_next().await {
            if let Err(e) = res {
                warn!(error = %e, "Document increment task failed");
            }
        }
    }
}

fn record_failure(op: &'static str, collection: &str, id: &str, error: &anyhow::Error) {
    let stage = StageError::DocumentStoreUnavailable;
    warn!(
        stage = stage.stage(),
        op,
        collection,
        id,
        error = %error,
        "{stage}"
    );
    stage.record();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroceryProduct, Platform};

    struct OfflineStore;

    #[async_trait]
    impl DocumentStore for OfflineStore {
        async fn get(&self, _: &str, _: &str) -> anyhow::Result<Option<StoredDocument>> {
            anyhow::bail!("permission denied")
        }

        async fn merge(&self, _: &str, _: &str, _: &str, _: &[Record]) -> anyhow::Result<()> {
            anyhow::bail!("network unreachable")
        }

        async fn increment(&self, _: &str, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("network unreachable")
        }

        async fn most_searched(&self, _: &str, _: u64) -> anyhow::Result<Vec<PopularQuery>> {
            anyhow::bail!("network unreachable")
        }
    }

    async fn adapter() -> (DocumentAdapter, Store) {
        let store = Store::in_memory().await.unwrap();
        let adapter = DocumentAdapter::new(Arc::new(SeaOrmDocumentStore::new(store.clone())));
        (adapter, store)
    }

    fn milk() -> Vec<Record> {
        vec![Record::Grocery(GroceryProduct::new("Milk", Platform::Zepto))]
    }

    #[tokio::test]
    async fn test_search_count_is_monotonic() {
        let (adapter, store) = adapter().await;
        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;

        let mut last = 1;
        for _ in 0..5 {
            let hit = adapter.read(SearchDomain::Grocery, "milk").await.unwrap();
            assert!(hit.search_count > last);
            last = hit.search_count;
            adapter.settle().await;
        }

        let doc = store
            .get_document("grocery_searches", "milk")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.search_count, 6);
    }

    #[tokio::test]
    async fn test_write_merges_without_resetting_counter() {
        let (adapter, store) = adapter().await;
        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;
        adapter.read(SearchDomain::Grocery, "milk").await.unwrap();
        adapter.settle().await;

        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;

        let doc = store
            .get_document("grocery_searches", "milk")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.search_count, 2);
    }

    #[tokio::test]
    async fn test_empty_document_is_a_miss() {
        let (adapter, _store) = adapter().await;
        adapter.write(SearchDomain::Grocery, "milk", &[]).await;

        assert!(adapter.read(SearchDomain::Grocery, "milk").await.is_none());
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let (adapter, _store) = adapter().await;
        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;

        assert!(
            adapter
                .read(SearchDomain::Restaurant, "milk")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_offline_store_degrades_to_absent() {
        let adapter = DocumentAdapter::new(Arc::new(OfflineStore));

        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;
        assert!(adapter.read(SearchDomain::Grocery, "milk").await.is_none());
        assert!(
            adapter
                .most_searched(SearchDomain::Grocery, 5)
                .await
                .is_empty()
        );
        adapter.settle().await;
    }

    #[tokio::test]
    async fn test_most_searched_orders_by_count() {
        let (adapter, _store) = adapter().await;
        adapter.write(SearchDomain::Grocery, "milk", &milk()).await;
        adapter.write(SearchDomain::Grocery, "bread", &milk()).await;
        adapter.read(SearchDomain::Grocery, "bread").await.unwrap();
        adapter.settle().await;

        let popular = adapter.most_searched(SearchDomain::Grocery, 10).await;
        assert_eq!(popular[0].query, "bread");
        assert_eq!(popular[0].search_count, 2);
        assert_eq!(popular[1].query, "milk");
    }
}
