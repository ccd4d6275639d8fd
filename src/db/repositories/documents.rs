use crate::entities::{prelude::*, query_documents};
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct DocumentRepository {
    conn: DatabaseConnection,
}

impl DocumentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<query_documents::Model>> {
        let row = QueryDocuments::find_by_id((collection.to_string(), document_id.to_string()))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Inserts with `search_count = 1`, or on conflict rewrites only the
    /// query, results and timestamp so the counter survives.
    pub async fn upsert(
        &self,
        collection: &str,
        document_id: &str,
        query: &str,
        results_json: &str,
    ) -> Result<()> {
        let active_model = query_documents::ActiveModel {
            collection: Set(collection.to_string()),
            document_id: Set(document_id.to_string()),
            query: Set(query.to_string()),
            results_json: Set(results_json.to_string()),
            search_count: Set(1),
            timestamp: Set(chrono::Utc::now().to_rfc3339()),
            last_searched: Set(None),
        };

        QueryDocuments::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    query_documents::Column::Collection,
                    query_documents::Column::DocumentId,
                ])
                .update_columns([
                    query_documents::Column::Query,
                    query_documents::Column::ResultsJson,
                    query_documents::Column::Timestamp,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    /// Single-statement `search_count = search_count + 1`.
    pub async fn record_hit(&self, collection: &str, document_id: &str) -> Result<u64> {
        let result = QueryDocuments::update_many()
            .col_expr(
                query_documents::Column::SearchCount,
                Expr::col(query_documents::Column::SearchCount).add(1),
            )
            .col_expr(
                query_documents::Column::LastSearched,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(query_documents::Column::Collection.eq(collection))
            .filter(query_documents::Column::DocumentId.eq(document_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn most_searched(
        &self,
        collection: &str,
        limit: u64,
    ) -> Result<Vec<query_documents::Model>> {
        let rows = QueryDocuments::find()
            .filter(query_documents::Column::Collection.eq(collection))
            .order_by_desc(query_documents::Column::SearchCount)
            .order_by_asc(query_documents::Column::DocumentId)
            .limit(limit)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
