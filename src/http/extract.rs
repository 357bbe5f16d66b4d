//! Bearer-token authentication extractor.

use super::{ApiError, AppState};
use crate::auth::{domain::Principal, ports::UserRepository};
use crate::task::ports::TaskRepository;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use mockable::Clock;

/// The verified principal of a request.
///
/// Rejects the request with `401` when the `Authorization: Bearer` token is
/// missing, expired, or invalid.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl<T, U, C> FromRequestParts<AppState<T, U, C>> for Authenticated
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<T, U, C>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::MissingToken)?;
        let principal = state.auth.authenticate(token)?;
        Ok(Self(principal))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let trimmed = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !trimmed.is_empty()).then_some(trimmed)
}
