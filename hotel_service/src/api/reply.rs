//! Envelope construction and the domain-error → HTTP translation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use hotel_service::domain::error::DomainError;
use model_response::ApiResponse;
use serde::Serialize;

pub fn success<T: Serialize>(data: T, message: &str) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data, message))).into_response()
}

pub fn created<T: Serialize>(data: T, message: &str) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(data, message)),
    )
        .into_response()
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::error("Method not allowed")),
    )
        .into_response()
}

/// Wrapper so domain errors can cross the crate boundary into axum.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::validation_failure(errors)),
            )
                .into_response(),
            DomainError::BadRequest(message) | DomainError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(message)),
            )
                .into_response(),
            DomainError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("{resource} not found"))),
            )
                .into_response(),
            DomainError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error(message)),
            )
                .into_response(),
            DomainError::Internal(err) => {
                // Detail stays in the logs; the client gets a generic body.
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
