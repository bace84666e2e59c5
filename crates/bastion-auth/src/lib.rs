//! # Bastion Auth
//!
//! Stateless identity tokens for the Bastion API.
//!
//! - [`claims`]: the JWT claim set (subject, issued-at, expiry)
//! - [`jwt`]: [`TokenService`], which signs and verifies tokens with the
//!   process-wide secret
//!
//! Tokens are never stored server side; a token stays valid until its
//! expiry passes.
//!
//! # Example
//!
//! ```ignore
//! use bastion_auth::TokenService;
//! use bastion_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let token = tokens.issue(user_id)?;
//! let claims = tokens.verify(&token)?;
//! assert_eq!(claims.user_id(), Some(user_id));
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::TokenService;
