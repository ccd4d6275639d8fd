//! Search fallback chain.
//!
//! Every call walks cache, document store, remote provider and synthetic
//! data in that order and stops at the first stage with results. Failures
//! are logged per stage and never reach the caller; the synthetic stage
//! always produces records.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::SearchCache;
use crate::clients::{FetchError, SearchProvider};
use crate::documents::{DocumentAdapter, PopularQuery};
use crate::models::{Record, SearchDomain, SearchQuery};
use crate::services::merge::{merge, ranked};
use crate::synthetic::SyntheticGenerator;

/// Stage failures. Logged and counted, never returned to callers.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Cache unavailable")]
    CacheUnavailable,

    #[error("Document store unavailable")]
    DocumentStoreUnavailable,

    #[error("Fetch failed: {0}")]
    FetchFailed(#[from] FetchError),
}

impl StageError {
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::CacheUnavailable => "cache",
            Self::DocumentStoreUnavailable => "documents",
            Self::FetchFailed(_) => "remote",
        }
    }

    pub fn record(&self) {
        metrics::counter!("larder_stage_errors_total", "stage" => self.stage()).increment(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    Cache,
    Document,
    Remote,
    Synthetic,
}

impl ResultOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Document => "document",
            Self::Remote => "remote",
            Self::Synthetic => "synthetic",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<Record>,
    pub origin: ResultOrigin,
}

impl SearchOutcome {
    /// Drives the advisory "Using sample data" notice.
    #[must_use]
    pub fn uses_sample_data(&self) -> bool {
        self.origin == ResultOrigin::Synthetic
    }
}

/// Merged and ranked result of a primary search and its first-word search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub records: Vec<Record>,
    pub origin: ResultOrigin,
    pub related_origin: Option<ResultOrigin>,
}

impl SearchReport {
    #[must_use]
    pub fn uses_sample_data(&self) -> bool {
        self.origin == ResultOrigin::Synthetic
            || self.related_origin == Some(ResultOrigin::Synthetic)
    }
}

pub struct SearchService {
    cache: SearchCache,
    documents: Arc<DocumentAdapter>,
    provider: Arc<dyn SearchProvider>,
    synthetic: SyntheticGenerator,
    synthetic_count: usize,
}

impl SearchService {
    #[must_use]
    pub fn new(
        cache: SearchCache,
        documents: Arc<DocumentAdapter>,
        provider: Arc<dyn SearchProvider>,
        synthetic: SyntheticGenerator,
        synthetic_count: usize,
    ) -> Self {
        Self {
            cache,
            documents,
            provider,
            synthetic,
            synthetic_count,
        }
    }

    #[must_use]
    pub fn documents(&self) -> &Arc<DocumentAdapter> {
        &self.documents
    }

    pub async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        let domain = query.domain();
        let key = query.cache_key();
        let normalized = query.normalized();

        if let Some(records) = self.cache.get(&key).await.filter(|r| !r.is_empty()) {
            return resolved(domain, &normalized, records, ResultOrigin::Cache);
        }

        if let Some(hit) = self.documents.read(domain, &normalized).await {
            debug!(query = %normalized, search_count = hit.search_count, "Document hit");
            self.cache.set(&key, &hit.results).await;
            return resolved(domain, &normalized, hit.results, ResultOrigin::Document);
        }

        match self.provider.fetch(query).await {
            Ok(records) if !records.is_empty() => {
                self.documents.write(domain, &normalized, &records).await;
                self.cache.set(&key, &records).await;
                return resolved(domain, &normalized, records, ResultOrigin::Remote);
            }
            Ok(_) => {
                debug!(query = %normalized, "Remote search returned no results");
            }
            Err(e) => {
                let err = StageError::from(e);
                warn!(stage = err.stage(), domain = %domain, query = %normalized, error = %err, "Remote search failed");
                err.record();
            }
        }

        let records = self.synthetic.generate(query, self.synthetic_count);
        resolved(domain, &normalized, records, ResultOrigin::Synthetic)
    }

    /// Runs the query and, for multi-word queries, its first word
    /// concurrently, then merges and ranks against the full query.
    pub async fn search_with_related(&self, query: &SearchQuery) -> SearchReport {
        let related = query.related();

        let (primary, secondary) = tokio::join!(self.search(query), async {
            match &related {
                Some(r) => Some(self.search(r).await),
                None => None,
            }
        });

        let related_origin = secondary.as_ref().map(|s| s.origin);
        let records = ranked(
            merge(
                primary.records,
                secondary.map(|s| s.records).unwrap_or_default(),
            ),
            query.text(),
        );

        SearchReport {
            records,
            origin: primary.origin,
            related_origin,
        }
    }

    pub async fn popular(&self, domain: SearchDomain, limit: u64) -> Vec<PopularQuery> {
        self.documents.most_searched(domain, limit).await
    }

    /// Waits for background document bookkeeping.
    pub async fn settle(&self) {
        self.documents.settle().await;
    }
}

fn resolved(
    domain: SearchDomain,
    query: &str,
    records: Vec<Record>,
    origin: ResultOrigin,
) -> SearchOutcome {
    metrics::counter!(
        "larder_search_stage_total",
        "domain" => domain.as_str(),
        "stage" => origin.as_str()
    )
    .increment(1);

    info!(
        domain = %domain,
        query,
        origin = origin.as_str(),
        count = records.len(),
        "Search resolved"
    );

    SearchOutcome { records, origin }
}
