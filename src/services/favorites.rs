//! Per-user favorites, one set per search domain.
//!
//! A set is loaded once per session and consulted in memory afterwards.
//! Writes touch exactly one stored row and mirror the change locally.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::db::Store;
use crate::models::SearchDomain;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FavoritesError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesSet {
    user_id: String,
    domain: SearchDomain,
    items: HashSet<String>,
}

impl FavoritesSet {
    #[must_use]
    pub fn new(user_id: &str, domain: SearchDomain, items: impl IntoIterator<Item = String>) -> Self {
        Self {
            user_id: user_id.to_string(),
            domain,
            items: items.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub const fn domain(&self) -> SearchDomain {
        self.domain
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.items.contains(identity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identities in lexical order.
    #[must_use]
    pub fn sorted(&self) -> Vec<String> {
        let mut list: Vec<String> = self.items.iter().cloned().collect();
        list.sort();
        list
    }
}

#[async_trait]
pub trait FavoritesService: Send + Sync {
    async fn load(&self, user_id: &str, domain: SearchDomain)
    -> Result<FavoritesSet, FavoritesError>;

    async fn add(&self, set: &mut FavoritesSet, identity: &str) -> Result<(), FavoritesError>;

    /// Returns whether the identity was a favorite.
    async fn remove(&self, set: &mut FavoritesSet, identity: &str) -> Result<bool, FavoritesError>;

    /// Flips membership and returns the new state.
    async fn toggle(&self, set: &mut FavoritesSet, identity: &str) -> Result<bool, FavoritesError>;
}

pub struct SeaOrmFavoritesService {
    store: Store,
}

impl SeaOrmFavoritesService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate(field: &str, value: &str) -> Result<(), FavoritesError> {
        if value.trim().is_empty() {
            return Err(FavoritesError::Validation(format!("{field} cannot be empty")));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesService for SeaOrmFavoritesService {
    async fn load(
        &self,
        user_id: &str,
        domain: SearchDomain,
    ) -> Result<FavoritesSet, FavoritesError> {
        Self::validate("user id", user_id)?;

        let items = self
            .store
            .list_favorites(user_id, domain.favorites_field())
            .await?;

        debug!(user_id, domain = %domain, count = items.len(), "Loaded favorites");
        Ok(FavoritesSet::new(user_id, domain, items))
    }

    async fn add(&self, set: &mut FavoritesSet, identity: &str) -> Result<(), FavoritesError> {
        Self::validate("identity", identity)?;

        self.store
            .favorites_repo()
            .add(&set.user_id, set.domain.favorites_field(), identity)
            .await?;

        set.items.insert(identity.to_string());
        Ok(())
    }

    async fn remove(&self, set: &mut FavoritesSet, identity: &str) -> Result<bool, FavoritesError> {
        Self::validate("identity", identity)?;

        let removed = self
            .store
            .favorites_repo()
            .remove(&set.user_id, set.domain.favorites_field(), identity)
            .await?;

        set.items.remove(identity);
        Ok(removed)
    }

    async fn toggle(&self, set: &mut FavoritesSet, identity: &str) -> Result<bool, FavoritesError> {
        if set.contains(identity) {
            self.remove(set, identity).await?;
            Ok(false)
        } else {
            self.add(set, identity).await?;
            Ok(true)
        }
    }
}
