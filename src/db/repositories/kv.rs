use crate::entities::{cache_entries, prelude::*};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

/// Raw string key/value rows backing the search cache.
pub struct KvRepository {
    conn: DatabaseConnection,
}

impl KvRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = CacheEntries::find_by_id(key.to_string())
            .one(&self.conn)
            .await?;
        Ok(row.map(|m| m.value))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let active_model = cache_entries::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        CacheEntries::insert(active_model)
            .on_conflict(
                OnConflict::column(cache_entries::Column::Key)
                    .update_columns([
                        cache_entries::Column::Value,
                        cache_entries::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        CacheEntries::delete_by_id(key.to_string())
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
