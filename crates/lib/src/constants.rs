//! Constants used throughout the HealthConnect library.
//!
//! Storage keys are shared with the web front end, which reads the same records
//! out of browser local storage. Front-end account records keep a plain-text
//! `password`; they are hashed when the directory loads them.

/// Store key holding the JSON array of registered accounts.
pub const ACCOUNTS_KEY: &str = "healthconnect_users";

/// Store key holding the JSON record of the active session.
pub const SESSION_KEY: &str = "healthconnect_currentUser";

/// Minimum length of a display name, after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
