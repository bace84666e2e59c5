use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::docs::openapi_json;
use crate::logging::logging_middleware;
use crate::middleware::catch_async::catch_async;
use crate::middleware::error::{handle_errors, not_found};
use crate::modules::auth::router::init_auth_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

async fn welcome() -> &'static str {
    "Welcome!"
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the application.
///
/// Layers wrap inside out: panics are caught closest to the handlers, the
/// error middleware sees every forwarded failure (including the not-found
/// fallback, which also answers known paths called with the wrong method),
/// and the request log sees the final status.
pub fn init_router(state: AppState, allowed_origins: &[String]) -> Router {
    let environment = state.environment;

    Router::new()
        .route("/", get(welcome))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/auth", init_auth_router(state.clone()))
        .nest("/users", init_users_router(state.clone()))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(catch_async))
        .layer(middleware::from_fn_with_state(environment, handle_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(middleware::from_fn(logging_middleware))
}
