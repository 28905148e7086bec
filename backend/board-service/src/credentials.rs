//! Credential store: username -> Argon2id password hash.
//!
//! Has its own reader/writer lock, independent of the content store. Hashing
//! and verification always run with the lock released.

use crate::error::Result;
use crate::models::Account;
use crypto_core::password;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Outcome of a registration, so callers can observe replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    /// An account with this username already existed and its hash was
    /// replaced.
    Replaced,
}

#[derive(Debug, Default)]
pub struct CredentialStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `password` and store it under `username`.
    ///
    /// Re-registering an existing username overwrites the stored
    /// hash; there is no uniqueness check.
    pub fn register(&self, username: &str, password: &str) -> Result<Registration> {
        let password_hash = password::hash_password(password)?;

        let account = Account {
            username: username.to_string(),
            password_hash,
        };
        let previous = self.accounts.write().insert(username.to_string(), account);

        if previous.is_some() {
            tracing::warn!(username = %username, "Re-registration replaced existing credentials");
            Ok(Registration::Replaced)
        } else {
            Ok(Registration::Created)
        }
    }

    /// `Ok(true)` only if `username` exists and `password` matches its hash.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let password_hash = {
            let accounts = self.accounts.read();
            match accounts.get(username) {
                Some(account) => account.password_hash.clone(),
                None => return Ok(false),
            }
        };

        Ok(password::verify_password(password, &password_hash)?)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.read().contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
