use axum::Json;
use axum::extract::{Path, State};
use bastion_core::ApiResult;
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;

use super::model::UserResponse;
use super::service::UserService;

/// Fetch a user by id (admins only)
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user id", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No user with that id", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_user(state.users.as_ref(), &id).await?;
    Ok(Json(UserResponse { user }))
}
