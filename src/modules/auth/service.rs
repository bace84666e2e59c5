use bastion_auth::TokenService;
use bastion_core::{AppError, RawError, hash_password};
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::users::model::{NewUser, Role, normalize_email};
use crate::modules::users::store::UserStore;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

/// Returns the trimmed value when present and not blank.
fn present(field: Option<&str>) -> Option<&str> {
    field.map(|value| value.trim()).filter(|value| !value.is_empty())
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register_user(
        store: &dyn UserStore,
        tokens: &TokenService,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, RawError> {
        let (Some(name), Some(email), Some(_)) = (
            present(dto.name.as_deref()),
            present(dto.email.as_deref()),
            present(dto.password.as_deref()),
        ) else {
            return Err(AppError::bad_request("All fields are required!").into());
        };

        dto.validate()?;

        let email = normalize_email(email);
        if store.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request("User already exists!").into());
        }

        let password = dto.password.as_deref().unwrap_or_default();
        let user = store
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash: hash_password(password)?,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        let token = tokens.issue(user.id)?;
        Ok(AuthResponse::new(user, token))
    }

    #[instrument(skip_all)]
    pub async fn login_user(
        store: &dyn UserStore,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<AuthResponse, RawError> {
        let (Some(email), Some(_)) = (
            present(dto.email.as_deref()),
            present(dto.password.as_deref()),
        ) else {
            return Err(AppError::bad_request("Please provide email and password!").into());
        };
        let password = dto.password.as_deref().unwrap_or_default();

        let invalid = || AppError::unauthorized("Invalid email or password!");

        let record = store
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;

        if !record.matches_password(password)? {
            return Err(invalid().into());
        }

        info!(user_id = %record.user.id, "User logged in");

        let token = tokens.issue(record.user.id)?;
        Ok(AuthResponse::new(record.user, token))
    }
}
