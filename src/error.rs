use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::StoreError;
use crate::domain::FilterError;
use crate::engine::PageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::OutOfRange(_) => "OUT_OF_RANGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL",
            AppError::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout { .. } => AppError::DeadlineExceeded(err.to_string()),
            StoreError::Query { .. } => AppError::Internal(err.to_string()),
        }
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::OffsetBeyondTotal { .. } => AppError::OutOfRange(err.to_string()),
            PageError::NegativeOffset(_) | PageError::NonPositiveCount(_) => {
                AppError::InvalidArgument(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::OutOfRange(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::DeadlineExceeded(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_timeout_maps_to_deadline_exceeded() {
        let err: AppError = StoreError::Timeout { op: "count_games" }.into();
        match err {
            AppError::DeadlineExceeded(msg) => assert!(msg.contains("count_games")),
            other => panic!("Expected DeadlineExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_store_query_failure_maps_to_internal_with_operation() {
        let err: AppError = StoreError::Query {
            op: "teams_by_ids",
            source: sqlx::Error::RowNotFound,
        }
        .into();
        match err {
            AppError::Internal(msg) => assert!(msg.starts_with("teams_by_ids")),
            other => panic!("Expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_page_errors() {
        let err: AppError = PageError::OffsetBeyondTotal { offset: 5, total: 4 }.into();
        assert!(matches!(err, AppError::OutOfRange(_)));
        let err: AppError = PageError::NonPositiveCount(0).into();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (AppError::OutOfRange("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::DeadlineExceeded("x".into()), StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
