//! Error types for the account system
use thiserror::Error;

use super::validation::FieldErrors;

/// Errors raised by [`AccountDirectory`](super::AccountDirectory) operations.
///
/// Every variant is recoverable: the directory state is left untouched and the
/// caller can resubmit.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more signup fields failed validation.
    #[error("{0}")]
    Validation(FieldErrors),

    /// Login was rejected.
    #[error(transparent)]
    Login(#[from] LoginError),

    /// The password hasher failed, or a stored hash could not be parsed.
    #[error("Password hashing failed: {reason}")]
    PasswordHash { reason: String },
}

/// Why a login attempt was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    #[error("Email or username is required")]
    MissingIdentifier,

    #[error("Password is required")]
    MissingPassword,

    #[error("User not found. Please check your email or sign up.")]
    UserNotFound,

    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,
}

impl AccountError {
    /// Check if this error is a signup validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AccountError::Validation(_))
    }

    /// Check if this error is a login rejection.
    pub fn is_login_error(&self) -> bool {
        matches!(self, AccountError::Login(_))
    }

    /// Check if this error indicates the account was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountError::Login(LoginError::UserNotFound))
    }
}

impl From<FieldErrors> for AccountError {
    fn from(errors: FieldErrors) -> Self {
        AccountError::Validation(errors)
    }
}

impl From<AccountError> for crate::Error {
    fn from(err: AccountError) -> Self {
        crate::Error::Account(err)
    }
}

impl From<LoginError> for crate::Error {
    fn from(err: LoginError) -> Self {
        crate::Error::Account(AccountError::Login(err))
    }
}

impl From<FieldErrors> for crate::Error {
    fn from(errors: FieldErrors) -> Self {
        crate::Error::Account(AccountError::Validation(errors))
    }
}
