//! Error responses for the HTTP boundary.

use crate::auth::{
    ports::UserRepositoryError,
    services::{AuthError, TokenError},
};
use crate::task::services::TaskServiceError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for every infrastructure failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Errors that can occur while serving a request.
///
/// Every variant renders as `{"message": ...}`. Internal failures are logged
/// with their detail and answered with [`INTERNAL_ERROR_MESSAGE`] only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no bearer token.
    #[error("No authorization token provided.")]
    MissingToken,

    /// The bearer token is expired or invalid.
    #[error(transparent)]
    Token(TokenError),

    /// The login email or password is wrong.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Registration used an email that already has an account.
    #[error("Email already exists.")]
    EmailTaken,

    /// The request body is malformed or fails input validation.
    #[error("{0}")]
    BadRequest(String),

    /// The principal's role does not permit the route.
    #[error("Forbidden: You do not have permission to access this resource.")]
    Forbidden,

    /// The task does not exist.
    #[error("Task not found")]
    NotFound,

    /// The principal may not access the task.
    #[error("You do not have permission to access this task.")]
    AccessDenied,

    /// The task fields failed validation.
    #[error("{0}")]
    InvalidTask(String),

    /// Infrastructure failure; the detail is only logged.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::Token(_) | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::EmailTaken | Self::BadRequest(_) | Self::InvalidTask(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden | Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound => Self::NotFound,
            TaskServiceError::AccessDenied => Self::AccessDenied,
            TaskServiceError::InvalidTask(_) => Self::InvalidTask(err.to_string()),
            TaskServiceError::Allocation(_) | TaskServiceError::Repository(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Domain(domain) => Self::BadRequest(domain.to_string()),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Token(TokenError::Signing(signing)) => Self::Internal(signing.to_string()),
            AuthError::Token(token) => Self::Token(token),
            AuthError::Repository(UserRepositoryError::DuplicateEmail(_)) => Self::EmailTaken,
            AuthError::Repository(repository) => Self::Internal(repository.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
