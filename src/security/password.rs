/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{AppError, Result};

/// Hash a password using Argon2id with a random salt.
/// Returns the PHC string suitable for storage in the database.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(rand::thread_rng());
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash.
/// Comparison runs in constant time inside the argon2 crate.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash format".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).unwrap();
        let result = verify_password("incorrect horse", &hash);
        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "pw1";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_plaintext_not_stored_in_hash() {
        let password = "super-secret-plaintext";
        let hash = hash_password(password).unwrap();
        assert!(!hash.contains(password));
    }

    #[test]
    fn test_garbage_hash_is_rejected() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
