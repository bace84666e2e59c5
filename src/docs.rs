use axum::Json;
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::modules::auth::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::modules::users::model::{Role, User, UserResponse};

/// Error payload outside development.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// `fail` for 4xx, `error` otherwise
    #[schema(example = "fail")]
    pub status: String,
    #[schema(example = "Not authorized, no token!")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::admin_dashboard,
        crate::modules::users::controller::get_user,
    ),
    components(
        schemas(
            User,
            Role,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and identity endpoints"),
        (name = "Users", description = "User lookup endpoints")
    ),
    info(
        title = "Bastion API",
        version = "0.1.0",
        description = "JWT-authenticated REST API built with Rust and Axum, with role-based authorization and a uniform error pipeline.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in ["/auth/register", "/auth/login", "/auth/me", "/auth/admin", "/users/{id}"] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
