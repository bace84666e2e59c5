//! Deployment environment flag.
//!
//! The error responder shapes its payloads from this value, so it is passed
//! around explicitly instead of being read from the process environment at
//! the point of use.

use std::convert::Infallible;
use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Deployment environment read from `APP_ENV`.
///
/// Anything that is not recognised as development or production maps to
/// [`Environment::Other`], which gets the terse payloads without internals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    #[default]
    Other,
}

impl Environment {
    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Other => "other",
        }
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "production" | "prod" => Environment::Production,
            _ => Environment::Other,
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_environments() {
        assert_eq!("development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" prod ".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
    }

    #[test]
    fn test_parse_unknown_environment_is_other() {
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Other));
        assert_eq!("".parse::<Environment>(), Ok(Environment::Other));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Other));
    }

    #[test]
    fn test_default_is_other() {
        assert_eq!(Environment::default(), Environment::Other);
        assert!(!Environment::default().is_production());
        assert!(!Environment::default().is_development());
    }

    #[test]
    fn test_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
