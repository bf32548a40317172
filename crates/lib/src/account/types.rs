//! Core data types for the account system

use serde::{Deserialize, Serialize};

use super::{crypto::hash_password, validation::normalize_email};

/// Username for an email: its local part, lower-cased.
///
/// ```
/// use healthconnect::account::username_from_email;
///
/// assert_eq!(username_from_email("Jo.Smith@Example.com"), "jo.smith");
/// ```
pub fn username_from_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    match normalized.split_once('@') {
        Some((local, _)) => local.to_string(),
        None => normalized,
    }
}

/// A registered account.
///
/// Accounts are created by signup and never change afterwards. The username is
/// not stored separately in memory; it is always derived from the email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AccountRecord", from = "AccountRecord")]
pub struct Account {
    /// Opaque unique identifier (UUID v4)
    pub id: String,

    /// Display name, trimmed
    pub name: String,

    /// Email, trimmed and lower-cased
    pub email: String,

    /// Argon2id hash of the password (PHC format)
    pub password_hash: String,

    /// Creation time, RFC 3339
    pub created_at: String,
}

impl Account {
    /// Login name derived from the email.
    pub fn username(&self) -> String {
        username_from_email(&self.email)
    }

    /// Whether `identifier` names this account by email or username,
    /// ignoring case and surrounding whitespace.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let needle = identifier.trim().to_lowercase();
        self.email.to_lowercase() == needle || self.username() == needle
    }
}

/// Stored layout of an [`Account`].
///
/// Carries `username` for readers of the raw record; it is ignored on load.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    id: String,
    name: String,
    email: String,
    #[serde(default, skip_deserializing)]
    username: String,
    password_hash: String,
    created_at: String,
}

impl From<Account> for AccountRecord {
    fn from(account: Account) -> Self {
        let username = account.username();
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            username,
            password_hash: account.password_hash,
            created_at: account.created_at,
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            created_at: record.created_at,
        }
    }
}

/// Account layout written by the web front end, which keeps the password in
/// plain text.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlainPasswordRecord {
    id: String,
    name: String,
    email: String,
    password: String,
    created_at: String,
}

impl PlainPasswordRecord {
    /// Converts to an [`Account`], hashing the plain password.
    pub(crate) fn into_account(self) -> crate::Result<Account> {
        Ok(Account {
            password_hash: hash_password(&self.password)?,
            id: self.id,
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            created_at: self.created_at,
        })
    }
}

/// The logged-in view of an account.
///
/// Never carries the password or its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Login time, RFC 3339
    pub login_time: String,
}

impl Session {
    /// Builds a session for `account` starting at `login_time`.
    pub fn for_account(account: &Account, login_time: impl Into<String>) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            username: account.username(),
            login_time: login_time.into(),
        }
    }
}
