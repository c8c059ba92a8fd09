//! bcrypt password hashing.

/// bcrypt's default work factor.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

/// Hash `plain` with the given work factor. The output embeds its own salt.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Constant-time check of `plain` against a stored hash.
///
/// A malformed stored hash verifies as `false`.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}
