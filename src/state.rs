use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::cache::{KeyValueStore, MemoryKeyValueStore, SearchCache, SqliteKeyValueStore};
use crate::clients::{SearchApiClient, SearchProvider};
use crate::config::Config;
use crate::db::Store;
use crate::documents::{DocumentAdapter, SeaOrmDocumentStore};
use crate::services::{FavoritesService, SeaOrmFavoritesService, SearchService};
use crate::synthetic::SyntheticGenerator;

/// Build a shared HTTP client for the search backend.
/// Per-request timeouts are applied by the client; this one bounds anything
/// that slips through.
fn build_shared_http_client(timeout_seconds: u64, user_agent: &str) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub search_api: Arc<SearchApiClient>,

    pub search_service: Arc<SearchService>,

    pub favorites: Arc<dyn FavoritesService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let search_api = Arc::new(Self::build_search_api(&config)?);
        Ok(Self::assemble(config, store, search_api.clone(), search_api))
    }

    /// Wires everything around an explicit provider. Used by tests to swap
    /// the remote backend for a fake.
    #[must_use]
    pub fn assemble(
        config: Config,
        store: Store,
        search_api: Arc<SearchApiClient>,
        provider: Arc<dyn SearchProvider>,
    ) -> Self {
        let kv: Arc<dyn KeyValueStore> = if config.general.is_in_memory() {
            Arc::new(MemoryKeyValueStore::new())
        } else {
            Arc::new(SqliteKeyValueStore::new(store.clone()))
        };

        let documents = Arc::new(DocumentAdapter::new(Arc::new(SeaOrmDocumentStore::new(
            store.clone(),
        ))));

        let synthetic = config
            .synthetic
            .seed
            .map_or_else(SyntheticGenerator::from_clock, SyntheticGenerator::seeded);

        let search_service = Arc::new(SearchService::new(
            SearchCache::new(kv),
            documents,
            provider,
            synthetic,
            config.synthetic.count,
        ));

        let favorites: Arc<dyn FavoritesService> =
            Arc::new(SeaOrmFavoritesService::new(store.clone()));

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            search_api,
            search_service,
            favorites,
        }
    }

    pub fn build_search_api(config: &Config) -> anyhow::Result<SearchApiClient> {
        let base_url = url::Url::parse(&config.search.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid search base URL: {e}"))?;

        let http_client = build_shared_http_client(
            config.search.request_timeout_seconds,
            &config.search.user_agent,
        )?;

        Ok(SearchApiClient::new(http_client, base_url).with_timeouts(
            Duration::from_secs(config.search.request_timeout_seconds),
            Duration::from_secs(config.search.status_timeout_seconds),
        ))
    }
}
