//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) so the
//! parameters travel with the hash. Both operations are CPU-bound and run on
//! the blocking pool.

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// Hash with a fresh random salt and the library's default cost parameters.
pub async fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| ServiceError::Hash(e.to_string()))?
}

/// Verify `plain` against a stored PHC string. Malformed hashes never verify.
pub async fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let plain = plain.to_owned();
    let stored_hash = stored_hash.to_owned();
    tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    })
    .await
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_and_is_salted() -> Result<(), ServiceError> {
        let a = hash_password("S3curePass!").await?;
        let b = hash_password("S3curePass!").await?;

        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b, "each hash gets its own salt");
        assert!(!a.contains("S3curePass!"));

        assert!(verify_password("S3curePass!", &a).await);
        assert!(verify_password("S3curePass!", &b).await);
        assert!(!verify_password("wrong", &a).await);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_hash_never_verifies() {
        assert!(!verify_password("S3curePass!", "S3curePass!").await);
        assert!(!verify_password("", "").await);
    }
}
