//! # Credential Service
//!
//! Turns a plaintext password into a storable, comparable digest.
//! The plaintext is never persisted and never logged.
//!
//! ## Scheme
//! argon2id with a random per-user salt, stored as a PHC string
//! (`$argon2id$v=19$m=…`). Verification re-derives the digest from the
//! stored parameters, so hashing is deliberately non-deterministic across
//! users: two identical passwords produce different stored strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{StoreError, StoreResult};

/// Hashes a plaintext password for storage.
///
/// ## Failure
/// Only fails if the hashing primitive itself fails, which is an
/// environment-level problem, not a user-correctable one.
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Credential(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC string.
///
/// Returns `false` for a wrong password AND for an unparseable stored
/// hash — verification never distinguishes the two to its caller.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("incorrect horse", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();

        // Per-user salt: identical passwords must not share a digest
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
