use std::sync::Arc;

use bastion_auth::TokenService;
use bastion_config::{AppConfig, Environment};
use tracing::{info, warn};

use crate::modules::users::store::{MemoryUserStore, PgUserStore, UserStore};

/// Shared, read-only application state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub environment: Environment,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, environment: Environment) -> Self {
        Self {
            users,
            tokens,
            environment,
        }
    }

    /// Builds the state for a running server. Users live in PostgreSQL when
    /// `DATABASE_URL` is set and in memory otherwise.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let users: Arc<dyn UserStore> = match &config.server.database_url {
            Some(url) => {
                let store = PgUserStore::connect(url).await?;
                info!("Connected to PostgreSQL user store");
                Arc::new(store)
            }
            None => {
                warn!("DATABASE_URL not set, users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new())
            }
        };

        Ok(Self::new(
            users,
            TokenService::new(&config.jwt),
            config.environment,
        ))
    }
}
