//! # Bastion Config
//!
//! Configuration types for the Bastion API.
//!
//! Every struct here is loaded from environment variables by a `from_env`
//! constructor and is read-only once the server has started:
//!
//! - [`environment`]: deployment environment (`APP_ENV`)
//! - [`jwt`]: token signing secret and lifetime
//! - [`server`]: listen address, CORS origins, optional database URL
//! - [`logging`]: log level and log directory
//!
//! # Example
//!
//! ```ignore
//! use bastion_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("running in {}", config.environment);
//! ```

pub mod environment;
pub mod jwt;
pub mod logging;
pub mod server;

pub use environment::Environment;
pub use jwt::JwtConfig;
pub use logging::LogConfig;
pub use server::ServerConfig;

/// All process-wide configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            jwt: JwtConfig::from_env(),
            server: ServerConfig::from_env(),
            logging: LogConfig::from_env(environment),
        }
    }
}
