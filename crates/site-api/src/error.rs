//! Error types for the site API.
//!
//! Every failure maps to one of three kinds, and only this module decides
//! status codes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// No record matches the requested identifier.
    #[error("{0}")]
    NotFound(String),

    /// Any other storage or serialization fault.
    #[error("Data access error: {0}")]
    DataAccess(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DataAccess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(err) => ApiError::Validation(err.to_string()),
            DatabaseError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{entity} not found"))
            }
            other => ApiError::DataAccess(other.to_string()),
        }
    }
}

impl From<database::ValidationError> for ApiError {
    fn from(err: database::ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::DataAccess(msg) => tracing::error!("Data access error: {}", msg),
            ApiError::Validation(msg) => tracing::debug!("Rejected request: {}", msg),
            ApiError::NotFound(_) => {}
        }

        let body = serde_json::json!({
            "success": false,
            "detail": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use database::ValidationError;

    #[test]
    fn test_database_errors_map_to_kinds() {
        let err = ApiError::from(DatabaseError::NotFound {
            entity: "Service",
            id: "abc".to_string(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Service not found");

        let err = ApiError::from(DatabaseError::Validation(ValidationError::EmptyUpdate));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No data provided for update");

        let err = ApiError::from(DatabaseError::InvalidDocument {
            collection: "reviews",
            reason: "rating must be between 1 and 5".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Data access error:"));
    }

    #[tokio::test]
    async fn test_error_body_is_enveloped() {
        let response = ApiError::NotFound("Not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "detail": "Not found"}));
    }
}
