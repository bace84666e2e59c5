use axum::{Router, middleware, routing::get};

use crate::middleware::auth::require_auth;
use crate::middleware::role::{authorize, role_guard};
use crate::state::AppState;

use super::controller::get_user;
use super::model::Role;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_user))
        .route_layer(middleware::from_fn_with_state(
            authorize(&[Role::Admin]),
            role_guard,
        ))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
