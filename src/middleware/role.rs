//! Role-based authorization.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/admin", get(handler))
//!     .route_layer(middleware::from_fn_with_state(
//!         authorize(&[Role::Admin]),
//!         role_guard,
//!     ))
//!     .route_layer(middleware::from_fn_with_state(state, require_auth));
//! ```
//!
//! The guard only reads the identity attached by
//! [`require_auth`](crate::middleware::auth::require_auth), so the auth
//! layer must wrap it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bastion_core::AppError;
use tracing::warn;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::Role;

pub const FORBIDDEN_MESSAGE: &str =
    "Forbidden, you do not have permission to perform this action!";

/// The set of roles allowed through a route.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: Arc<[Role]>,
}

/// Builds a guard admitting only identities whose role is in `roles`.
pub fn authorize(roles: &[Role]) -> RoleGuard {
    RoleGuard {
        allowed: Arc::from(roles),
    }
}

impl RoleGuard {
    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Fails closed: a request with no attached identity is forbidden too.
    pub fn check(&self, user: Option<&CurrentUser>) -> Result<(), AppError> {
        match user {
            Some(CurrentUser(user)) if self.allows(user.role) => Ok(()),
            _ => Err(AppError::forbidden(FORBIDDEN_MESSAGE)),
        }
    }
}

pub async fn role_guard(
    State(guard): State<RoleGuard>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req.extensions().get::<CurrentUser>();
    if let Err(err) = guard.check(user) {
        warn!(
            user_id = ?user.map(|u| u.0.id),
            role = ?user.map(|u| u.0.role),
            path = %req.uri().path(),
            "Role check failed"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
