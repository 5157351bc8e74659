//! HTTP layer - axum router, shared state and error mapping.
//!
//! Handlers are thin: they decode the request, call one store operation and
//! serialize the result. Status codes come from [`ErrorKind`], never from the
//! handlers themselves.

/// OpenAPI document for the HTTP surface
pub mod docs;
/// Request handlers for flights and health probes
pub mod handlers;
/// Router construction and middleware
pub mod routes;

pub use routes::build_router;

use crate::errors::{Error, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

/// Shared data available to all handlers.
/// Holds the database handle constructed at startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all store operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` around an already opened database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable error message
    pub error: String,
    /// HTTP status code, repeated from the response line
    pub status: u16,
}

/// Wrapper that converts an [`Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps `ApiError` to a JSON body `{"error": ..., "status": ...}` with the matching status code.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "server error");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "client error");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::FlightNotFound { id: 1 }, StatusCode::NOT_FOUND),
            (Error::MissingField { field: "to" }, StatusCode::BAD_REQUEST),
            (
                Error::InvalidDate {
                    value: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::Database(sea_orm::DbErr::Custom("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
