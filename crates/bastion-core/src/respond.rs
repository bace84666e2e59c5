//! Environment-aware rendering of [`AppError`]s.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use bastion_config::Environment;
use serde_json::{Value, json};

use crate::errors::{AppError, StatusClass};

/// What production clients see for non-operational errors.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went very wrong!";

/// Builds the JSON body for `err`.
///
/// - development: status, message, stack and the error structure
/// - production: status and message for operational errors, a fixed
///   generic message otherwise
/// - anything else: status and message
pub fn error_payload(err: &AppError, environment: Environment) -> Value {
    match environment {
        Environment::Development => json!({
            "status": err.status_class(),
            "message": err.message(),
            "stack": err.stack(),
            "error": {
                "statusCode": err.status_code(),
                "status": err.status_class(),
                "isOperational": err.is_operational(),
                "message": err.message(),
                "causes": err.causes(),
            },
        }),
        Environment::Production if !err.is_operational() => json!({
            "status": StatusClass::Error,
            "message": GENERIC_ERROR_MESSAGE,
        }),
        Environment::Production | Environment::Other => json!({
            "status": err.status_class(),
            "message": err.message(),
        }),
    }
}

/// Renders `err` as a single JSON response carrying its status code.
pub fn respond(err: &AppError, environment: Environment) -> Response {
    (err.status(), Json(error_payload(err, environment))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn internal_failure() -> AppError {
        AppError::unexpected(
            &anyhow::anyhow!("password=hunter2 leaked in query").context("db exploded"),
        )
    }

    #[test]
    fn test_development_payload_is_verbose() {
        let err = AppError::bad_request("All fields are required!");
        let payload = error_payload(&err, Environment::Development);

        assert_eq!(payload["status"], "fail");
        assert_eq!(payload["message"], "All fields are required!");
        assert!(payload["stack"].as_str().unwrap().contains("All fields are required!"));
        assert_eq!(payload["error"]["statusCode"], 400);
        assert_eq!(payload["error"]["isOperational"], true);
    }

    #[test]
    fn test_development_payload_includes_causes() {
        let payload = error_payload(&internal_failure(), Environment::Development);

        assert_eq!(payload["status"], "error");
        assert_eq!(payload["message"], "db exploded");
        assert_eq!(payload["error"]["isOperational"], false);
        assert_eq!(
            payload["error"]["causes"][0],
            "password=hunter2 leaked in query"
        );
    }

    #[test]
    fn test_production_operational_payload() {
        let err = AppError::unauthorized("Not authorized, no token!");
        let payload = error_payload(&err, Environment::Production);

        assert_eq!(
            payload,
            json!({"status": "fail", "message": "Not authorized, no token!"})
        );
    }

    #[test]
    fn test_production_hides_non_operational_details() {
        let payload = error_payload(&internal_failure(), Environment::Production);

        assert_eq!(
            payload,
            json!({"status": "error", "message": GENERIC_ERROR_MESSAGE})
        );
        let rendered = payload.to_string();
        assert!(!rendered.contains("db exploded"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("stack"));
    }

    #[test]
    fn test_production_hides_any_non_operational_message() {
        for message in ["", "secret", "stack trace at line 3", "Something"] {
            let err = AppError::unexpected(&anyhow::anyhow!("{}", message));
            let payload = error_payload(&err, Environment::Production);

            assert_eq!(payload["message"], GENERIC_ERROR_MESSAGE);
            assert!(payload.get("stack").is_none());
            assert!(payload.get("error").is_none());
        }
    }

    #[test]
    fn test_other_environment_is_terse() {
        let payload = error_payload(&internal_failure(), Environment::Other);

        assert_eq!(payload, json!({"status": "error", "message": "db exploded"}));
    }

    #[test]
    fn test_respond_uses_error_status() {
        let response = respond(&AppError::forbidden("nope"), Environment::Production);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = respond(&internal_failure(), Environment::Development);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
