use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::models::QueryError;
use crate::services::FavoritesError;

#[derive(Debug)]
pub enum ApiError {
    DatabaseError(String),

    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<FavoritesError> for ApiError {
    fn from(err: FavoritesError) -> Self {
        match err {
            FavoritesError::Validation(msg) => Self::ValidationError(msg),
            FavoritesError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(QueryError::Empty), StatusCode::BAD_REQUEST),
            (
                ApiError::from(FavoritesError::Validation("identity must not be empty".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(FavoritesError::Database("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
