use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bastion_core::ApiResult;
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::JsonBody;

use super::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Missing fields, validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = AuthService::register_user(state.users.as_ref(), &state.tokens, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::login_user(state.users.as_ref(), &state.tokens, dto).await?;
    Ok(Json(response))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "User profile fetched successfully!".to_string(),
        user,
    })
}

/// Admin-only greeting
#[utoipa::path(
    get,
    path = "/auth/admin",
    responses(
        (status = 200, description = "Caller is an admin", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn admin_dashboard(CurrentUser(user): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome, admin!".to_string(),
        user,
    })
}
