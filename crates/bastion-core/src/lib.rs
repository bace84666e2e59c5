//! # Bastion Core
//!
//! Error model and shared utilities for the Bastion API.
//!
//! - [`errors`]: [`AppError`], the classified error sent to clients, and
//!   [`RawError`], the tagged failure value handlers and collaborators
//!   produce and forward
//! - [`classify`]: turns any [`RawError`] into an [`AppError`]
//! - [`respond`]: environment-aware error payloads
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use bastion_config::Environment;
//! use bastion_core::{RawError, classify, respond};
//!
//! let raw = RawError::DuplicateKey {
//!     field: "email".to_string(),
//!     value: "a@x.com".to_string(),
//! };
//! let error = classify(&raw);
//! assert_eq!(error.status_code(), 400);
//!
//! let response = respond(&error, Environment::Production);
//! ```

pub mod classify;
pub mod errors;
pub mod password;
pub mod respond;

// Re-export commonly used types at crate root
pub use classify::classify;
pub use errors::{ApiResult, AppError, ForwardedError, RawError, StatusClass};
pub use password::{hash_password, verify_password};
pub use respond::{error_payload, respond};
