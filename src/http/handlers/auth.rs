//! Registration and login handlers.

use crate::auth::{ports::UserRepository, services::Credentials};
use crate::http::{ApiError, AppState};
use crate::task::ports::TaskRepository;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Body of the register and login routes.
#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl From<CredentialsBody> for Credentials {
    fn from(body: CredentialsBody) -> Self {
        Self::new(body.email, body.password)
    }
}

/// Response of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisteredBody {
    uid: String,
    message: &'static str,
}

/// Response of a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInBody {
    token: String,
    expires_at: DateTime<Utc>,
    message: &'static str,
}

/// Registers an account.
///
/// # Errors
///
/// Returns `400` for invalid input or a taken email.
pub async fn register<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    payload: Result<Json<CredentialsBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisteredBody>), ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let Json(body) = payload?;
    let account = state.auth.register(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredBody {
            uid: account.id().as_str().to_owned(),
            message: "User registered successfully.",
        }),
    ))
}

/// Exchanges credentials for a session token.
///
/// # Errors
///
/// Returns `401` when the credentials do not match an account.
pub async fn login<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    payload: Result<Json<CredentialsBody>, JsonRejection>,
) -> Result<Json<LoggedInBody>, ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let Json(body) = payload?;
    let issued = state.auth.login(body.into()).await?;
    Ok(Json(LoggedInBody {
        token: issued.token().to_owned(),
        expires_at: issued.expires_at(),
        message: "User logged in successfully.",
    }))
}
