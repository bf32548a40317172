//! Signup form validation
//!
//! Each field is checked independently and reports at most one message, the
//! first rule it fails. All four fields are always checked so the caller can show
//! every problem at once.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::constants::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};

/// A signup form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
    Confirm,
}

impl Field {
    /// Wire name of the field, as used by the front end.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Confirm => "confirm",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field signup error messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Records `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Please fix the errors above")?;
        for (i, (field, message)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field}: {message}")?;
        }
        Ok(())
    }
}

/// Lower-cases and trims an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks the `local@domain.tld` shape.
///
/// The address must contain no whitespace and exactly one `@`, with a non-empty
/// local part and a domain holding a `.` that is neither its first nor its last
/// character.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Any dot with text on both sides will do.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validates the display name.
pub fn validate_name(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Some("Full name is required")
    } else if trimmed.chars().count() < MIN_NAME_LENGTH {
        Some("Name must be at least 2 characters")
    } else {
        None
    }
}

/// Validates the email. The shape check sees the address as given, so
/// surrounding whitespace makes it invalid. `already_registered` is consulted
/// only for well-formed addresses, with the normalized email.
pub fn validate_email(
    email: &str,
    already_registered: impl FnOnce(&str) -> bool,
) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address")
    } else if already_registered(&normalize_email(email)) {
        Some("Email already registered. Try logging in.")
    } else {
        None
    }
}

/// Validates the password. Length is counted in characters.
pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some("Password must be at least 8 characters")
    } else {
        None
    }
}

/// Validates the confirmation against the password, independent of whether the
/// password itself is acceptable.
pub fn validate_confirmation(password: &str, confirm: &str) -> Option<&'static str> {
    if confirm.is_empty() {
        Some("Please confirm your password")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// Runs every field check and collects the failures.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    already_registered: impl FnOnce(&str) -> bool,
) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if let Some(msg) = validate_name(name) {
        errors.insert(Field::Name, msg);
    }
    if let Some(msg) = validate_email(email, already_registered) {
        errors.insert(Field::Email, msg);
    }
    if let Some(msg) = validate_password(password) {
        errors.insert(Field::Password, msg);
    }
    if let Some(msg) = validate_confirmation(password, confirm) {
        errors.insert(Field::Confirm, msg);
    }
    errors
}
