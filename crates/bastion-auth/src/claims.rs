//! JWT claim set for identity tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every identity token.
///
/// Only the subject is carried; the identity itself is loaded from the
/// user store on each request so role changes apply immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    /// The subject as a user id, if it is a well-formed UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}
