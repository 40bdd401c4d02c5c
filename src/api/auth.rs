//! Password hashing for user registration and login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::ApiError;
use crate::db::User;

/// Hash a password with Argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// [`hash_password`] on the blocking pool; Argon2 is CPU-bound.
pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ApiError::bad_request(format!("Failed to hash password: {}", e)))
}

/// First of `candidates` whose stored hash matches `password`, checked on the
/// blocking pool.
pub async fn find_verified_user(
    candidates: Vec<User>,
    password: String,
) -> Result<Option<User>, ApiError> {
    tokio::task::spawn_blocking(move || {
        candidates
            .into_iter()
            .find(|user| verify_password(&password, &user.password_hash))
    })
    .await
    .map_err(|e| ApiError::internal(format!("Password check task failed: {}", e)))
}
