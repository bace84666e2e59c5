use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_auth;
use crate::middleware::role::{authorize, role_guard};
use crate::modules::users::model::Role;
use crate::state::AppState;

use super::controller::{admin_dashboard, get_me, login_user, register_user};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(admin_dashboard))
        .route_layer(middleware::from_fn_with_state(
            authorize(&[Role::Admin]),
            role_guard,
        ));

    // Layers added later wrap the earlier ones, so authentication runs
    // before the role guard.
    let protected = Router::new()
        .route("/me", get(get_me))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .merge(protected)
}
