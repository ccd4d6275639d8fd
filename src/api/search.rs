use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PopularParams, PopularResponse, SearchParams, SearchResponse};
use crate::models::{Record, SearchDomain, SearchQuery};

const SAMPLE_DATA_NOTICE: &str = "Using sample data";
const DEFAULT_POPULAR_LIMIT: u64 = 10;
const MAX_POPULAR_LIMIT: u64 = 50;

/// `GET /api/{domain}/search?q=&city=&related=`
///
/// Never fails on upstream trouble: the fallback chain always yields
/// results, flagged with `sample_data` when they are synthetic.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let domain: SearchDomain = domain.parse()?;
    let query = SearchQuery::new(domain, &params.q)?.with_city(params.city.as_deref());

    let (records, origin, related_origin, sample_data) = if params.related.unwrap_or(true) {
        let report = state.search_service().search_with_related(&query).await;
        let sample = report.uses_sample_data();
        (report.records, report.origin, report.related_origin, sample)
    } else {
        let outcome = state.search_service().search(&query).await;
        let sample = outcome.uses_sample_data();
        (outcome.records, outcome.origin, None, sample)
    };

    Ok(Json(ApiResponse::success(SearchResponse {
        query: query.text().to_string(),
        domain,
        origin,
        related_origin,
        sample_data,
        notice: sample_data.then(|| SAMPLE_DATA_NOTICE.to_string()),
        cards: records.iter().map(Record::card).collect(),
        results: records,
    })))
}

/// `GET /api/{domain}/popular?limit=`
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
    Query(params): Query<PopularParams>,
) -> Result<Json<ApiResponse<PopularResponse>>, ApiError> {
    let domain: SearchDomain = domain.parse()?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_POPULAR_LIMIT)
        .clamp(1, MAX_POPULAR_LIMIT);

    let queries = state.search_service().popular(domain, limit).await;

    Ok(Json(ApiResponse::success(PopularResponse { domain, queries })))
}
