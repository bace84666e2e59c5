use std::env;

use crate::environment::Environment;

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for the rolling log files.
    pub dir: String,
}

impl LogConfig {
    pub fn from_env(environment: Environment) -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| default_level(environment).to_string()),
            dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}

/// Production logs at `info`, everything else at `debug`.
pub fn default_level(environment: Environment) -> &'static str {
    if environment.is_production() {
        "info"
    } else {
        "debug"
    }
}
