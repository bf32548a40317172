//! Account system for HealthConnect
//!
//! Provides registration with per-field validation, login by email or username,
//! and a single persisted session.

pub mod crypto;
pub mod directory;
pub mod errors;
pub mod types;
pub mod validation;

pub use directory::AccountDirectory;
pub use errors::{AccountError, LoginError};
pub use types::{Account, Session, username_from_email};
pub use validation::{Field, FieldErrors};
