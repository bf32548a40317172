//! Password hashing for the account system
//!
//! Passwords are stored as Argon2id PHC strings; the salt is embedded in the
//! hash string, so nothing else needs to be kept alongside it.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::{AccountError, LoginError};
use crate::Result;

/// Hash a password using Argon2id with a fresh random salt.
///
/// # Returns
/// The PHC-format hash string.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| AccountError::PasswordHash {
            reason: e.to_string(),
        })?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
///
/// # Errors
/// [`LoginError::IncorrectPassword`] on mismatch, [`AccountError::PasswordHash`]
/// if the stored hash cannot be parsed.
pub fn verify_password(password: impl AsRef<str>, stored_hash: impl AsRef<str>) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash.as_ref()).map_err(|e| AccountError::PasswordHash {
        reason: format!("stored hash is unreadable: {e}"),
    })?;

    match Argon2::default().verify_password(password.as_ref().as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(LoginError::IncorrectPassword.into()),
        Err(e) => Err(AccountError::PasswordHash {
            reason: e.to_string(),
        }
        .into()),
    }
}
