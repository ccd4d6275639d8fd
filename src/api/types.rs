use serde::{Deserialize, Serialize};

use crate::documents::PopularQuery;
use crate::models::{Record, RecordCard, SearchDomain};
use crate::services::ResultOrigin;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub city: Option<String>,
    /// Also search the first word of multi-word queries. Defaults to on.
    pub related: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub domain: SearchDomain,
    pub origin: ResultOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_origin: Option<ResultOrigin>,
    pub sample_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub results: Vec<Record>,
    pub cards: Vec<RecordCard>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub user_id: String,
    pub domain: SearchDomain,
    pub items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteChange {
    pub identity: String,
    pub favorite: bool,
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub domain: SearchDomain,
    pub queries: Vec<PopularQuery>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
    pub search_api: bool,
    pub search_base_url: String,
}
