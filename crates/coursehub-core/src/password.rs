use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Work factor used for new digests. Test builds trade strength for speed.
#[cfg(not(feature = "test-utils"))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
// Lowest cost bcrypt accepts.
#[cfg(feature = "test-utils")]
const HASH_COST: u32 = 4;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
