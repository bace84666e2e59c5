//! Password hashing with bcrypt.

use bcrypt::{hash, verify};

use crate::errors::RawError;

/// Work factor for new hashes.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, RawError> {
    Ok(hash(password, HASH_COST)?)
}

/// Compares `password` against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, RawError> {
    Ok(verify(password, hash)?)
}
