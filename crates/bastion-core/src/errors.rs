//! Application error types.
//!
//! Two types cooperate here:
//!
//! - [`RawError`] is what handlers, middleware and collaborators return. It
//!   is a closed set of failure shapes (driver errors, token errors, already
//!   classified errors, unexpected errors).
//! - [`AppError`] is the classified result the client sees: a status code,
//!   a message, and whether the failure was anticipated (operational).
//!
//! Returning a [`RawError`] from an axum handler does not render it
//! directly. The failure is attached to the response as a
//! [`ForwardedError`] and the global error middleware classifies and
//! responds. See `bastion::middleware::error`.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bastion_config::Environment;
use serde::Serialize;
use validator::ValidationErrors;

use crate::classify::classify;
use crate::respond::respond;

pub type ApiResult<T> = Result<T, RawError>;

/// Coarse status bucket sent as the `status` field of error payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    /// Client errors (4xx).
    Fail,
    /// Everything else.
    Error,
}

impl StatusClass {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_client_error() {
            StatusClass::Fail
        } else {
            StatusClass::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Fail => "fail",
            StatusClass::Error => "error",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified error, ready to be rendered for a client.
///
/// Errors built with [`AppError::new`] (and the shorthand constructors) are
/// operational: anticipated failures whose message is safe to show. Only
/// the classifier creates non-operational errors, through
/// [`AppError::unexpected`].
#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    message: String,
    is_operational: bool,
    causes: Vec<String>,
    backtrace: Arc<Backtrace>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            is_operational: true,
            causes: Vec::new(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Wraps an error this system did not anticipate.
    ///
    /// The result is a non-operational 500 that keeps the error chain for
    /// development payloads and logs.
    pub fn unexpected(err: &anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            is_operational: false,
            causes: err.chain().skip(1).map(|cause| cause.to_string()).collect(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(self.status)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_operational(&self) -> bool {
        self.is_operational
    }

    /// Messages of the underlying error chain, outermost first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Human-readable trace: the message, its causes and, when
    /// `RUST_BACKTRACE` enabled capture, the backtrace.
    pub fn stack(&self) -> String {
        let mut stack = format!("Error: {}", self.message);
        for cause in &self.causes {
            stack.push_str("\n    caused by: ");
            stack.push_str(cause);
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            stack.push('\n');
            stack.push_str(&self.backtrace.to_string());
        }
        stack
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Every way a request can fail before classification.
///
/// Collaborators convert their own errors into one of these shapes at the
/// boundary (the user store maps SQLSTATE codes, the token service maps
/// `jsonwebtoken` error kinds), so the classifier only ever matches on this
/// closed set.
#[derive(Debug, thiserror::Error)]
pub enum RawError {
    /// Already classified by the code that raised it.
    #[error(transparent)]
    App(#[from] AppError),

    /// A value that could not be parsed as an identifier.
    #[error("invalid {path}: {value}")]
    InvalidId { path: String, value: String },

    /// One or more field-level validation failures.
    #[error("validation failed: {}", .errors.join(", "))]
    Validation { errors: Vec<String> },

    /// A unique constraint rejected the value.
    #[error("duplicate value for {field}: {value}")]
    DuplicateKey { field: String, value: String },

    #[error("malformed token")]
    MalformedToken,

    #[error("expired token")]
    ExpiredToken,

    /// Anything else; never shown to clients in production.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RawError {
    pub fn invalid_id(path: impl Into<String>, value: impl Into<String>) -> Self {
        RawError::InvalidId {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn duplicate_key(field: impl Into<String>, value: impl Into<String>) -> Self {
        RawError::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }
}

fn format_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

impl From<ValidationErrors> for RawError {
    fn from(errors: ValidationErrors) -> Self {
        RawError::Validation {
            errors: format_errors(&errors),
        }
    }
}

impl From<bcrypt::BcryptError> for RawError {
    fn from(err: bcrypt::BcryptError) -> Self {
        RawError::Unexpected(anyhow::Error::new(err).context("password hashing failed"))
    }
}

/// A failure travelling from a handler to the global error middleware
/// inside the response extensions.
#[derive(Debug, Clone)]
pub struct ForwardedError(Arc<RawError>);

impl ForwardedError {
    pub fn raw(&self) -> &RawError {
        &self.0
    }
}

impl IntoResponse for RawError {
    fn into_response(self) -> Response {
        // The production rendering is only what a client sees when no error
        // middleware is installed; it never leaks internals.
        let mut response = respond(&classify(&self), Environment::Production);
        response
            .extensions_mut()
            .insert(ForwardedError(Arc::new(self)));
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        RawError::App(self).into_response()
    }
}
