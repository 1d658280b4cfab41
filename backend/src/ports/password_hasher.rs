//! Password hashing port.

use crate::domain::foundation::AuthError;

/// One-way password hashing.
///
/// Implementations return self-describing hash strings so parameters can
/// change without invalidating stored hashes.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Returns `Ok(false)` on mismatch. Errors only for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PasswordHasher) {}
}
