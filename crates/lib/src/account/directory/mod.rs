//! Account directory and session manager
//!
//! [`AccountDirectory`] owns the registered accounts and the single active
//! session. It loads both records from a [`KeyValueStore`] once, serves reads
//! from memory, and rewrites the affected record in full after every mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    crypto::{hash_password, verify_password},
    errors::LoginError,
    types::{Account, PlainPasswordRecord, Session},
    validation::{normalize_email, validate_signup},
};
use crate::{
    Clock, Result, SystemClock,
    constants::{ACCOUNTS_KEY, SESSION_KEY},
    store::{KeyValueStore, StoreError},
};


/// In-memory copy of the two persisted records.
#[derive(Debug, Default)]
struct DirectoryState {
    accounts: Vec<Account>,
    session: Option<Session>,
}

impl DirectoryState {
    fn email_exists(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.accounts.iter().any(|a| a.email.to_lowercase() == email)
    }

    /// First account, in registration order, matching by email or username.
    fn find(&self, identifier: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.matches_identifier(identifier))
    }
}

/// The account directory service.
///
/// Build one per store with [`AccountDirectory::open`] and share it by
/// reference. Mutations hold an exclusive lock for the whole
/// check-then-write sequence, so concurrent signups through one directory cannot
/// register the same email twice. Separate processes writing the same store are
/// not coordinated.
///
/// # Example
/// ```
/// # use std::sync::Arc;
/// # use healthconnect::{AccountDirectory, store::InMemory};
/// # #[tokio::main]
/// # async fn main() -> healthconnect::Result<()> {
/// let directory = AccountDirectory::open(Arc::new(InMemory::new())).await;
///
/// directory
///     .register_account("Asha Rao", "asha@example.com", "secret12", "secret12")
///     .await?;
/// let session = directory.login("asha", "secret12").await?;
/// assert_eq!(session.email, "asha@example.com");
/// assert!(directory.is_authenticated().await);
///
/// directory.logout().await?;
/// assert!(!directory.is_authenticated().await);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AccountDirectory {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    state: RwLock<DirectoryState>,
}

impl AccountDirectory {
    /// Load the directory and session from `store`.
    ///
    /// Missing or unreadable records are treated as "no data yet": an empty
    /// directory and no active session. This never fails.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::open_impl(store, Arc::new(SystemClock)).await
    }

    /// Same as [`AccountDirectory::open`] with a custom clock for timestamps.
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub async fn open_with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::open_impl(store, clock).await
    }

    async fn open_impl(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let records: Vec<Value> = load_record(store.as_ref(), ACCOUNTS_KEY)
            .await
            .unwrap_or_default();
        let (accounts, upgraded) = decode_accounts(records);
        if upgraded > 0 {
            // Rewrite now so plain-text passwords do not stay in the store
            match write_record(store.as_ref(), ACCOUNTS_KEY, &accounts).await {
                Ok(()) => info!(upgraded, "hashed plain-text passwords in stored accounts"),
                Err(e) => warn!(error = %e, "failed to rewrite upgraded account records"),
            }
        }
        let session = load_record::<Option<Session>>(store.as_ref(), SESSION_KEY)
            .await
            .flatten();
        debug!(
            accounts = accounts.len(),
            authenticated = session.is_some(),
            "loaded account directory"
        );

        Self {
            store,
            clock,
            state: RwLock::new(DirectoryState { accounts, session }),
        }
    }

    // === Registration ===

    /// Register a new account.
    ///
    /// All four fields are validated and every failure is reported together as
    /// [`AccountError::Validation`](super::AccountError::Validation); nothing is
    /// changed in that case. On success the account is appended, the whole
    /// directory is written back to the store, and the new account is returned.
    ///
    /// # Arguments
    /// * `name` - Display name, at least 2 characters after trimming
    /// * `email` - Email address, unique ignoring case
    /// * `password` - At least 8 characters
    /// * `confirm_password` - Must equal `password` exactly
    pub async fn register_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account> {
        let mut state = self.state.write().await;

        let errors = validate_signup(name, email, password, confirm_password, |email| {
            state.email_exists(email)
        });
        if !errors.is_empty() {
            debug!(failed = errors.len(), "signup rejected");
            return Err(errors.into());
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash: hash_password(password)?,
            created_at: self.clock.now_rfc3339(),
        };

        state.accounts.push(account.clone());
        if let Err(e) = write_record(self.store.as_ref(), ACCOUNTS_KEY, &state.accounts).await {
            state.accounts.pop();
            return Err(e);
        }

        info!(account_id = %account.id, username = %account.username(), "registered account");
        Ok(account)
    }

    // === Login / Logout ===

    /// Log in by email or username.
    ///
    /// The identifier is matched case-insensitively against both fields; the
    /// password is compared exactly. A successful login replaces any existing
    /// session.
    ///
    /// # Errors
    /// [`LoginError::MissingIdentifier`] and [`LoginError::MissingPassword`] are
    /// checked before lookup, then [`LoginError::UserNotFound`] or
    /// [`LoginError::IncorrectPassword`].
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Session> {
        if identifier.trim().is_empty() {
            return Err(LoginError::MissingIdentifier.into());
        }
        if password.is_empty() {
            return Err(LoginError::MissingPassword.into());
        }

        let mut state = self.state.write().await;

        let Some(account) = state.find(identifier) else {
            debug!("login for unknown identifier");
            return Err(LoginError::UserNotFound.into());
        };
        if let Err(e) = verify_password(password, &account.password_hash) {
            debug!(account_id = %account.id, "login rejected");
            return Err(e);
        }

        let session = Session::for_account(account, self.clock.now_rfc3339());
        write_record(self.store.as_ref(), SESSION_KEY, &session).await?;
        state.session = Some(session.clone());

        info!(account_id = %session.id, "logged in");
        Ok(session)
    }

    /// End the active session.
    ///
    /// Calling this with no active session is a no-op.
    pub async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        self.store.remove(SESSION_KEY).await?;
        if let Some(session) = state.session.take() {
            info!(account_id = %session.id, "logged out");
        }
        Ok(())
    }

    // === Reads ===

    /// Whether a session is active.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    /// The active session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    /// All accounts in registration order.
    pub async fn accounts(&self) -> Vec<Account> {
        self.state.read().await.accounts.clone()
    }

    /// Number of registered accounts.
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.accounts.is_empty()
    }

    /// Whether an account with this email exists, ignoring case.
    pub async fn email_exists(&self, email: &str) -> bool {
        self.state.read().await.email_exists(email)
    }

    /// Whether any account has this username, ignoring case.
    pub async fn username_exists(&self, username: &str) -> bool {
        let username = username.trim().to_lowercase();
        self.state
            .read()
            .await
            .accounts
            .iter()
            .any(|a| a.username() == username)
    }

    /// The first account matching `identifier` by email or username.
    pub async fn find_account(&self, identifier: &str) -> Option<Account> {
        self.state.read().await.find(identifier).cloned()
    }
}

/// Decodes the accounts record one element at a time.
///
/// Elements in the plain-password layout are converted to hashed accounts and
/// counted in the second return value. Any other element that does not decode
/// is logged and skipped, so one bad entry never hides the rest.
fn decode_accounts(records: Vec<Value>) -> (Vec<Account>, usize) {
    let mut accounts = Vec::with_capacity(records.len());
    let mut upgraded = 0;
    for (index, record) in records.iter().enumerate() {
        let error = match Account::deserialize(record) {
            Ok(account) => {
                accounts.push(account);
                continue;
            }
            Err(e) => e,
        };
        match PlainPasswordRecord::deserialize(record).map(PlainPasswordRecord::into_account) {
            Ok(Ok(account)) => {
                accounts.push(account);
                upgraded += 1;
            }
            Ok(Err(e)) => warn!(index, error = %e, "skipping account record"),
            Err(_) => warn!(index, %error, "skipping unreadable account record"),
        }
    }
    (accounts, upgraded)
}

/// Reads and decodes `key`, logging and discarding anything unreadable.
async fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored record, treating as empty");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored record is unparsable, treating as empty");
            None
        }
    }
}

/// Encodes `value` and replaces `key` with it.
async fn write_record<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::SerializationFailed {
        what: key.to_string(),
        source,
    })?;
    store.set(key, json).await?;
    debug!(key, "wrote record");
    Ok(())
}
