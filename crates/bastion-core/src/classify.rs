//! Conversion of raw failures into client-facing [`AppError`]s.

use crate::errors::{AppError, RawError};

pub const INVALID_TOKEN_MESSAGE: &str = "invalid token, please log in again.";
pub const EXPIRED_TOKEN_MESSAGE: &str = "token expired, please log in again.";

/// Classifies a failure. The input is left untouched; the result is always
/// a fresh [`AppError`].
///
/// Only [`RawError::Unexpected`] produces a non-operational error.
pub fn classify(raw: &RawError) -> AppError {
    match raw {
        RawError::App(err) => err.clone(),
        RawError::InvalidId { path, value } => {
            AppError::bad_request(format!("Invalid {}: {}.", path, value))
        }
        RawError::Validation { errors } => {
            AppError::bad_request(format!("Invalid input data. {}", errors.join(". ")))
        }
        RawError::DuplicateKey { field, value } => AppError::bad_request(format!(
            "Duplicate field value: {} = {}. Please use another value!",
            field, value
        )),
        RawError::MalformedToken => AppError::unauthorized(INVALID_TOKEN_MESSAGE),
        RawError::ExpiredToken => AppError::unauthorized(EXPIRED_TOKEN_MESSAGE),
        RawError::Unexpected(err) => AppError::unexpected(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatusClass;

    #[test]
    fn test_app_error_passes_through() {
        let raw = RawError::App(AppError::not_found("Cannot find /nowhere on this server!"));
        let err = classify(&raw);

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Cannot find /nowhere on this server!");
        assert!(err.is_operational());
    }

    #[test]
    fn test_invalid_id() {
        let err = classify(&RawError::invalid_id("_id", "abc"));

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid _id: abc.");
        assert_eq!(err.status_class(), StatusClass::Fail);
    }

    #[test]
    fn test_validation_messages_are_joined() {
        let raw = RawError::Validation {
            errors: vec![
                "Please, enter your name!".to_string(),
                "Password must be at least 6 characters long!".to_string(),
            ],
        };
        let err = classify(&raw);

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.message(),
            "Invalid input data. Please, enter your name!. Password must be at least 6 characters long!"
        );
    }

    #[test]
    fn test_duplicate_key_names_field_and_value() {
        for (field, value) in [("email", "a@x.com"), ("name", "Ada"), ("slug", "")] {
            let err = classify(&RawError::duplicate_key(field, value));

            assert_eq!(err.status_code(), 400);
            assert!(err.message().contains(field));
            assert!(err.message().contains(value));
            assert!(err.is_operational());
        }
    }

    #[test]
    fn test_token_errors() {
        let malformed = classify(&RawError::MalformedToken);
        assert_eq!(malformed.status_code(), 401);
        assert_eq!(malformed.message(), INVALID_TOKEN_MESSAGE);

        let expired = classify(&RawError::ExpiredToken);
        assert_eq!(expired.status_code(), 401);
        assert_eq!(expired.message(), EXPIRED_TOKEN_MESSAGE);
    }

    #[test]
    fn test_unexpected_is_non_operational() {
        let raw = RawError::Unexpected(anyhow::anyhow!("pool timed out"));
        let err = classify(&raw);

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.status_class(), StatusClass::Error);
        assert_eq!(err.message(), "pool timed out");
        assert!(!err.is_operational());
    }

    #[test]
    fn test_classify_does_not_consume_input() {
        let raw = RawError::duplicate_key("email", "a@x.com");
        let first = classify(&raw);
        let second = classify(&raw);

        assert_eq!(first.message(), second.message());
        assert!(matches!(raw, RawError::DuplicateKey { .. }));
    }
}
