//! Unified error handling for the API.
//!
//! Every error renders as `{"error": "<message>"}`. Server-side failures are
//! reported to Sentry with full detail while the client gets a generic
//! message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use shinewell_core::ValidationError;

use crate::db::RepositoryError;
use crate::services::{AuthError, OrderWorkflowError};

/// Application-level error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted entity failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// No admin is signed in, or the credentials were wrong.
    #[error("{0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(err) if err.is_connection_failure() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::BAD_REQUEST,
            Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client.
    fn client_message(&self) -> String {
        match self {
            Self::Database(err) if err.is_connection_failure() => {
                "Database connection failed".to_string()
            }
            Self::Database(err) if err.is_timeout() => "Database operation timed out".to_string(),
            Self::Database(RepositoryError::Conflict(_)) => "Duplicate entry detected".to_string(),
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Database(
                    RepositoryError::Database(_)
                        | RepositoryError::DataCorruption(_)
                        | RepositoryError::Migration(_)
                )
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest("Invalid JSON in request body".to_string())
    }
}

impl From<OrderWorkflowError> for AppError {
    fn from(err: OrderWorkflowError) -> Self {
        match err {
            OrderWorkflowError::InvalidOrderId | OrderWorkflowError::InvalidStatus => {
                Self::BadRequest(err.to_string())
            }
            OrderWorkflowError::NotFound => Self::NotFound(err.to_string()),
            OrderWorkflowError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidEmail(_) => {
                Self::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Repository(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(admin_id: &str, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
