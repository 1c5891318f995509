//! Password hashing
//!
//! Credentials are stored as bcrypt strings (`$2b$<cost>$<salt+digest>`).
//! Verification is delegated to `bcrypt`, which compares in constant time.

use crate::error::UserError;

/// Work factor for new hashes
pub const DEFAULT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Hash `password` under a fresh random salt
pub fn hash_password(password: &str, cost: u32) -> Result<String, UserError> {
    bcrypt::hash(password, cost.clamp(MIN_COST, MAX_COST))
        .map_err(|e| UserError::Hashing(e.to_string()))
}

/// Check `password` against a stored hash
pub fn verify_password(password: &str, stored: &str) -> Result<bool, UserError> {
    bcrypt::verify(password, stored).map_err(|_| UserError::MalformedCredential)
}
