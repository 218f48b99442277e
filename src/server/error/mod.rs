//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{error::config::ConfigError, model::query::QueryError},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Business failures (`NotFound`,
/// `ReservationIneligible`, `ConcurrentModification`, ...) carry a message returned to the
/// client, infrastructure failures are logged and answered with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// A stored document could not be encoded or decoded.
    ///
    /// Results in 500 Internal Server Error; request payloads are validated before they
    /// reach this point.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Socket or other I/O failure, typically while binding the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed filter or projection.
    ///
    /// Results in 400 Bad Request.
    #[error(transparent)]
    QueryErr(#[from] QueryError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// A client cannot get a place in a session (no active membership, unpaid balance, ...).
    ///
    /// Results in 422 Unprocessable Entity. The waiting-list publisher recovers from this
    /// error by moving on to the next waiting client.
    #[error("Client {client_id} cannot reserve: {reason}")]
    ReservationIneligible { client_id: String, reason: String },

    /// A document changed between being read and being written.
    ///
    /// Results in 409 Conflict. The whole operation may be retried by the caller.
    #[error("{0}")]
    ConcurrentModification(String),

}

impl AppError {
    /// Whether the publisher loop may skip this error and continue with the next subscriber.
    pub fn is_ineligible(&self) -> bool {
        matches!(self, Self::ReservationIneligible { .. })
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` and `QueryErr`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `ConcurrentModification`
/// - 422 Unprocessable Entity - For `ReservationIneligible`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::QueryErr(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            Self::ConcurrentModification(msg) => {
                tracing::debug!("Concurrent modification: {}", msg);
                (StatusCode::CONFLICT, Json(ErrorDto { error: msg })).into_response()
            }
            err @ Self::ReservationIneligible { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: each business error maps to its documented status code
    #[test]
    fn maps_business_errors_to_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::QueryErr(QueryError::FilterNotObject),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ConcurrentModification("x".into()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::ReservationIneligible {
                    client_id: "c1".into(),
                    reason: "no membership".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::DbErr(sea_orm::DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    /// Expected: only ReservationIneligible is skippable
    #[test]
    fn only_ineligible_is_skippable() {
        assert!(AppError::ReservationIneligible {
            client_id: "c".into(),
            reason: "r".into()
        }
        .is_ineligible());
        assert!(!AppError::NotFound("c".into()).is_ineligible());
    }
}
