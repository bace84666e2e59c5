//! Administrative commands shared by the `bastion-cli` binary.
//!
//! Admins can't be created through the API; registration always yields the
//! `user` role.

use bastion_core::{AppError, RawError, hash_password};
use tracing::info;

use crate::modules::users::model::{NewUser, Role, User, normalize_email};
use crate::modules::users::store::UserStore;

pub async fn create_admin(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, RawError> {
    let name = name.trim();
    let email = normalize_email(email);

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("All fields are required!").into());
    }

    if password.chars().count() < 6 {
        return Err(AppError::bad_request("Password must be at least 6 characters long!").into());
    }

    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::bad_request("User already exists!").into());
    }

    let user = store
        .create(NewUser {
            name: name.to_string(),
            email,
            password_hash: hash_password(password)?,
            role: Role::Admin,
        })
        .await?;

    info!(user_id = %user.id, "Admin account created");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::store::MemoryUserStore;

    #[tokio::test]
    async fn test_create_admin() {
        let store = MemoryUserStore::new();
        let user = create_admin(&store, " Root ", "Root@Example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "Root");
        assert_eq!(user.email, "root@example.com");

        let stored = store.find_by_email("root@example.com").await.unwrap().unwrap();
        assert!(stored.matches_password("hunter22").unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_existing_email() {
        let store = MemoryUserStore::new();
        create_admin(&store, "Root", "root@example.com", "hunter22")
            .await
            .unwrap();

        let err = create_admin(&store, "Other", "root@example.com", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, RawError::App(ref e) if e.message() == "User already exists!"));
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let store = MemoryUserStore::new();
        let err = create_admin(&store, "Root", "root@example.com", "abc")
            .await
            .unwrap_err();

        assert!(matches!(err, RawError::App(ref e) if e.status_code() == 400));
        assert!(store.is_empty().await);
    }
}
