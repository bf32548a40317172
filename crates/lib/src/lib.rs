//!
//! HealthConnect: the account core of the HealthConnect clinic finder.
//! This library provides account registration, login, and the single active session,
//! persisted through a pluggable key-value store.
//!
//! ## Core Concepts
//!
//! * **Accounts (`account::Account`)**: A registered user's profile and password hash. Created by
//!   signup, never mutated or deleted afterwards.
//! * **Sessions (`account::Session`)**: The subset of an account exposed after a successful login.
//!   At most one session is active at a time.
//! * **Directory (`account::AccountDirectory`)**: The service object that owns all accounts and the
//!   active session. Construct it once with [`AccountDirectory::open`] and pass it by reference.
//! * **Stores (`store::KeyValueStore`)**: The host-provided key-value storage. The directory writes
//!   full snapshots of its two records on every mutation.
//! * **Clocks (`Clock`)**: The time source for creation and login timestamps.

pub mod account;
pub mod clock;
pub mod constants;
pub mod store;

pub use account::{Account, AccountDirectory, Session};
pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the HealthConnect library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the HealthConnect library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured account errors from the account module
    #[error(transparent)]
    Account(account::AccountError),

    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Account(_) => "account",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error is a signup validation failure.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Account(account_err) => account_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error is a login failure.
    pub fn is_login_error(&self) -> bool {
        match self {
            Error::Account(account_err) => account_err.is_login_error(),
            _ => false,
        }
    }

    /// Check if this error indicates the account was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Account(account_err) => account_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is storage related.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Per-field signup errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&account::FieldErrors> {
        match self {
            Error::Account(account::AccountError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }

    /// The login failure, if this is one.
    pub fn login_error(&self) -> Option<&account::LoginError> {
        match self {
            Error::Account(account::AccountError::Login(err)) => Some(err),
            _ => None,
        }
    }
}
