use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, FavoriteChange, FavoritesResponse};
use crate::models::SearchDomain;

/// `GET /api/users/{user_id}/favorites/{domain}`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path((user_id, domain)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FavoritesResponse>>, ApiError> {
    let domain: SearchDomain = domain.parse()?;
    let set = state.favorites().load(&user_id, domain).await?;

    Ok(Json(ApiResponse::success(FavoritesResponse {
        items: set.sorted(),
        user_id,
        domain,
    })))
}

/// `PUT /api/users/{user_id}/favorites/{domain}/{identity}`
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, domain, identity)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<FavoriteChange>>, ApiError> {
    let domain: SearchDomain = domain.parse()?;
    let favorites = state.favorites();

    let mut set = favorites.load(&user_id, domain).await?;
    let changed = !set.contains(&identity);
    favorites.add(&mut set, &identity).await?;

    Ok(Json(ApiResponse::success(FavoriteChange {
        identity,
        favorite: true,
        changed,
    })))
}

/// `DELETE /api/users/{user_id}/favorites/{domain}/{identity}`
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, domain, identity)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<FavoriteChange>>, ApiError> {
    let domain: SearchDomain = domain.parse()?;
    let favorites = state.favorites();

    let mut set = favorites.load(&user_id, domain).await?;
    let changed = favorites.remove(&mut set, &identity).await?;

    Ok(Json(ApiResponse::success(FavoriteChange {
        identity,
        favorite: false,
        changed,
    })))
}
