//! User persistence.
//!
//! [`UserStore`] is the only way the rest of the application reaches user
//! records. Implementations translate their own failures into
//! [`RawError`] shapes before returning, so a unique-constraint conflict
//! always surfaces as [`RawError::DuplicateKey`] whatever the backend.
//!
//! - [`MemoryUserStore`]: process-local, used when no database is configured
//!   and in tests
//! - [`PgUserStore`]: PostgreSQL through `sqlx`

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use std::fmt;

use async_trait::async_trait;
use bastion_core::RawError;
use uuid::Uuid;

use super::model::{NewUser, User, UserWithPassword};

#[async_trait]
pub trait UserStore: Send + Sync + fmt::Debug {
    /// Credential lookup for login; `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, RawError>;

    /// Identity lookup; the credential is never loaded.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RawError>;

    /// Persists a new user.
    ///
    /// # Errors
    ///
    /// [`RawError::DuplicateKey`] when the email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, RawError>;
}
