// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides the response envelope and maps catalog errors onto HTTP status codes

use atelier_catalog::CatalogError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::{error, warn};

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// HTTP face of a catalog error
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        ApiError(CatalogError::not_found(entity, key))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::AlreadyExists { .. } => StatusCode::CONFLICT,
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Integrity(_) => StatusCode::CONFLICT,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            CatalogError::Storage(err) => {
                error!("Storage failure: {}", err);
                "Internal server error".to_string()
            }
            CatalogError::Integrity(detail) => {
                warn!("Integrity violation: {}", detail);
                self.0.to_string()
            }
            other => other.to_string(),
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
