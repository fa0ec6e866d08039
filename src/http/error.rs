//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::ComputeError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Engine computation error
    Compute(ComputeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Compute(e) => compute_error_response(e),
        };

        (status, Json(error)).into_response()
    }
}

fn compute_error_response(e: ComputeError) -> (StatusCode, ApiError) {
    match e {
        ComputeError::NoDataForDate { .. } => (
            StatusCode::NOT_FOUND,
            ApiError::new("NO_DATA_FOR_DATE", e.to_string()),
        ),
        ComputeError::InsufficientCoverage { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("INSUFFICIENT_COVERAGE", e.to_string()),
        ),
        ComputeError::InvalidParameter(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_PARAMETER", e.to_string()),
        ),
        ComputeError::NoClimatologyData => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("NO_CLIMATOLOGY_DATA", e.to_string()),
        ),
        ComputeError::Repository(repo_err) => match repo_err {
            RepositoryError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", repo_err.to_string()),
            ),
            RepositoryError::ValidationError { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION_ERROR", repo_err.to_string()),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("REPOSITORY_ERROR", other.to_string()),
            ),
        },
    }
}

impl From<ComputeError> for AppError {
    fn from(err: ComputeError) -> Self {
        AppError::Compute(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Compute(ComputeError::Repository(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StationId;
    use axum::response::IntoResponse;

    #[test]
    fn test_no_data_maps_to_404() {
        let err = AppError::Compute(ComputeError::NoDataForDate {
            station_id: StationId::new("TEST0001"),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_parameter_maps_to_400() {
        let err = AppError::Compute(ComputeError::InvalidParameter("bad".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_insufficient_coverage_maps_to_422() {
        let err = AppError::Compute(ComputeError::InsufficientCoverage {
            observed: 1,
            window_days: 7,
            min_coverage_ratio: 0.5,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
