use anyhow::{Context, Result};
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, SqlxSqliteConnector, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::query_documents;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = if is_memory_url(db_url) {
            SqlxSqliteConnector::from_sqlx_sqlite_pool(
                memory_pool_options()
                    .connect(db_url)
                    .await
                    .context("Failed to open in-memory database")?,
            )
        } else {
            ensure_database_file(db_url)?;
            Database::connect(file_connect_options(db_url, max_connections, min_connections))
                .await?
        };

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn kv_repo(&self) -> repositories::kv::KvRepository {
        repositories::kv::KvRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn document_repo(&self) -> repositories::documents::DocumentRepository {
        repositories::documents::DocumentRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn favorites_repo(&self) -> repositories::favorites::FavoritesRepository {
        repositories::favorites::FavoritesRepository::new(self.conn.clone())
    }

    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<query_documents::Model>> {
        self.document_repo().get(collection, document_id).await
    }

    pub async fn list_favorites(
        &self,
        user_id: &str,
        field: &str,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        self.favorites_repo().list(user_id, field).await
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:")
}

/// Every connection to `sqlite::memory:` is its own empty database, so the
/// pool holds exactly one connection and never retires it.
fn memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(None)
        .max_lifetime(None)
}

fn file_connect_options(db_url: &str, max_connections: u32, min_connections: u32) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(600))
        .sqlx_logging(false);
    opt
}

fn ensure_database_file(db_url: &str) -> Result<()> {
    let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
    let path_str = path_str.split('?').next().unwrap_or(path_str);
    if let Some(parent) = Path::new(path_str).parent() {
        std::fs::create_dir_all(parent).ok();
    }
    if !Path::new(path_str).exists() {
        std::fs::File::create(path_str)
            .with_context(|| format!("Failed to create database file {path_str}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_never_retires_its_connection() {
        let options = memory_pool_options();
        assert_eq!(options.get_max_connections(), 1);
        assert!(options.get_idle_timeout().is_none());
        assert!(options.get_max_lifetime().is_none());

        let store = Store::in_memory().await.unwrap();
        let pool = store.conn.get_sqlite_connection_pool().options();
        assert!(pool.get_idle_timeout().is_none());
        assert!(pool.get_max_lifetime().is_none());
        assert_eq!(pool.get_min_connections(), 1);
    }

    #[tokio::test]
    async fn test_kv_overwrite_and_delete() {
        let store = Store::in_memory().await.unwrap();
        let kv = store.kv_repo();

        assert!(kv.get("k").await.unwrap().is_none());
        kv.set("k", "one").await.unwrap();
        kv.set("k", "two").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("two"));

        kv.delete("k").await.unwrap();
        assert!(kv.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_document_upsert_keeps_counter() {
        let store = Store::in_memory().await.unwrap();
        let docs = store.document_repo();

        docs.upsert("grocery_searches", "milk", "milk", "[]")
            .await
            .unwrap();
        assert_eq!(docs.record_hit("grocery_searches", "milk").await.unwrap(), 1);
        assert_eq!(docs.record_hit("grocery_searches", "milk").await.unwrap(), 1);

        docs.upsert("grocery_searches", "milk", "milk", "[1]")
            .await
            .unwrap();

        let doc = store
            .get_document("grocery_searches", "milk")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.search_count, 3);
        assert_eq!(doc.results_json, "[1]");
        assert!(doc.last_searched.is_some());
    }

    #[tokio::test]
    async fn test_record_hit_on_missing_document() {
        let store = Store::in_memory().await.unwrap();
        let affected = store
            .document_repo()
            .record_hit("grocery_searches", "nothing")
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_favorites_add_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        let favs = store.favorites_repo();

        favs.add("u1", "favorite_restaurants", "Royal Biryani")
            .await
            .unwrap();
        favs.add("u1", "favorite_restaurants", "Royal Biryani")
            .await
            .unwrap();

        let list = store
            .list_favorites("u1", "favorite_restaurants")
            .await
            .unwrap();
        assert_eq!(list, vec!["Royal Biryani".to_string()]);

        assert!(
            favs.remove("u1", "favorite_restaurants", "Royal Biryani")
                .await
                .unwrap()
        );
        assert!(
            !favs
                .remove("u1", "favorite_restaurants", "Royal Biryani")
                .await
                .unwrap()
        );
    }
}
