//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the `JWT_SECRET` from
//! [`JwtConfig`]. Verification failures are reported as
//! [`RawError::ExpiredToken`] or [`RawError::MalformedToken`] so the error
//! pipeline can tell them apart without inspecting `jsonwebtoken` types.

use std::fmt;

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use bastion_config::JwtConfig;
use bastion_core::RawError;

use crate::claims::Claims;

/// Signs and verifies identity tokens.
///
/// Keys are derived once from the configured secret; the service is cheap
/// to clone and read-only after construction.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: i64,
}

impl TokenService {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            expiry: jwt_config.token_expiry,
        }
    }

    /// Issues a token for `user_id` that expires after the configured
    /// lifetime.
    pub fn issue(&self, user_id: Uuid) -> Result<String, RawError> {
        let now = Utc::now().timestamp() as usize;
        let exp = now + self.expiry as usize;

        self.sign(&Claims {
            sub: user_id.to_string(),
            iat: now,
            exp,
        })
    }

    /// Signs an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, RawError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| RawError::Unexpected(anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies the signature and expiry of `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`RawError::ExpiredToken`] if the expiry has passed
    /// - [`RawError::MalformedToken`] for anything else: bad encoding, bad
    ///   signature, wrong algorithm, missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, RawError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => RawError::ExpiredToken,
                _ => RawError::MalformedToken,
            })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
