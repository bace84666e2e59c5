use async_trait::async_trait;
use bastion_core::RawError;
use sqlx::PgPool;
use sqlx::postgres::{PgDatabaseError, PgPoolOptions};
use tracing::instrument;
use uuid::Uuid;

use super::UserStore;
use crate::modules::users::model::{NewUser, User, UserWithPassword};

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// PostgreSQL-backed user store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, RawError> {
        sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RawError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn create(&self, new_user: NewUser) -> Result<User, RawError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

/// Maps driver errors onto the shapes the classifier understands.
fn map_db_error(err: sqlx::Error) -> RawError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let detail = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail());
            let (field, value) = detail
                .and_then(parse_key_detail)
                .unwrap_or_else(|| {
                    (
                        db_err.constraint().unwrap_or("value").to_string(),
                        String::new(),
                    )
                });
            return RawError::DuplicateKey { field, value };
        }

        // not_null_violation, check_violation
        if matches!(db_err.code().as_deref(), Some("23502") | Some("23514")) {
            return RawError::Validation {
                errors: vec![db_err.message().to_string()],
            };
        }
    }

    RawError::Unexpected(anyhow::Error::new(err).context("database operation failed"))
}

/// Parses PostgreSQL's `Key (email)=(a@x.com) already exists.` detail line.
fn parse_key_detail(detail: &str) -> Option<(String, String)> {
    let rest = detail.strip_prefix("Key (")?;
    let (field, rest) = rest.split_once(")=(")?;
    let (value, _) = rest.rsplit_once(')')?;
    Some((field.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_detail() {
        assert_eq!(
            parse_key_detail("Key (email)=(a@x.com) already exists."),
            Some(("email".to_string(), "a@x.com".to_string()))
        );
    }

    #[test]
    fn test_parse_key_detail_value_with_parens() {
        assert_eq!(
            parse_key_detail("Key (name)=(Ada (the first)) already exists."),
            Some(("name".to_string(), "Ada (the first)".to_string()))
        );
    }

    #[test]
    fn test_parse_key_detail_unrecognized() {
        assert_eq!(parse_key_detail("something else"), None);
        assert_eq!(parse_key_detail("Key (email)"), None);
    }

    #[test]
    fn test_non_database_errors_are_unexpected() {
        let raw = map_db_error(sqlx::Error::RowNotFound);
        assert!(matches!(raw, RawError::Unexpected(_)));
    }
}
