use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{Role, User};

/// Registration body. Fields are optional so a missing field reaches the
/// "all fields are required" guard instead of a deserialization error.
#[derive(Deserialize, Validate, ToSchema, Default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Please, enter your name!"))]
    pub name: Option<String>,
    #[validate(email(message = "Please, enter a valid email!"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long!"))]
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        }
    }
}

/// Payload of the protected routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub user: User,
}
