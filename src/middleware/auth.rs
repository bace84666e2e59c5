//! Bearer-token authentication.
//!
//! [`require_auth`] resolves the `Authorization: Bearer <token>` header to a
//! stored [`User`] and attaches it to the request as [`CurrentUser`].
//! Handlers and later middleware read it back with the [`CurrentUser`]
//! extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use bastion_core::{AppError, RawError};
use tracing::debug;

use crate::modules::users::model::User;
use crate::state::AppState;

pub const NO_TOKEN_MESSAGE: &str = "Not authorized, no token!";
pub const TOKEN_FAILED_MESSAGE: &str = "Not authorized, token failed!";
pub const USER_NOT_FOUND_MESSAGE: &str = "Not authorized, user not found!";

/// The authenticated identity of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, uses another
/// scheme or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware.
///
/// Every outcome is either the downstream response or a forwarded failure:
///
/// - no usable bearer token: 401 [`NO_TOKEN_MESSAGE`]
/// - signature or expiry rejected: the token error from
///   [`TokenService::verify`](bastion_auth::TokenService::verify)
/// - subject is not a user id: 401 [`TOKEN_FAILED_MESSAGE`]
/// - no such user: 401 [`USER_NOT_FOUND_MESSAGE`]
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, RawError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized(NO_TOKEN_MESSAGE))?;

    let claims = state.tokens.verify(token)?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::unauthorized(TOKEN_FAILED_MESSAGE))?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized(USER_NOT_FOUND_MESSAGE))?;

    debug!(user_id = %user.id, role = %user.role, "Authenticated request");

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN_MESSAGE))
    }
}
