use crate::entities::{prelude::*, user_favorites};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct FavoritesRepository {
    conn: DatabaseConnection,
}

impl FavoritesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, user_id: &str, field: &str) -> Result<Vec<String>, DbErr> {
        let rows = UserFavorites::find()
            .filter(user_favorites::Column::UserId.eq(user_id))
            .filter(user_favorites::Column::Field.eq(field))
            .order_by_asc(user_favorites::Column::AddedAt)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|m| m.identity).collect())
    }

    /// Insert-if-absent. Re-adding keeps the original `added_at`.
    pub async fn add(&self, user_id: &str, field: &str, identity: &str) -> Result<(), DbErr> {
        let active_model = user_favorites::ActiveModel {
            user_id: Set(user_id.to_string()),
            field: Set(field.to_string()),
            identity: Set(identity.to_string()),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        UserFavorites::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    user_favorites::Column::UserId,
                    user_favorites::Column::Field,
                    user_favorites::Column::Identity,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn remove(&self, user_id: &str, field: &str, identity: &str) -> Result<bool, DbErr> {
        let result = UserFavorites::delete_by_id((
            user_id.to_string(),
            field.to_string(),
            identity.to_string(),
        ))
        .exec(&self.conn)
        .await?;

        Ok(result.rows_affected > 0)
    }
}
