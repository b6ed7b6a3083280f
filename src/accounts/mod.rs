//! In-memory account registry used by the registration endpoint.
//!
//! Passwords are validated but never stored; persistence of credentials is
//! the job of whatever sits behind this in a real deployment.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

pub mod error;
pub mod validate;

pub use error::RegistrationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub nickname: String,
}

#[derive(Default)]
struct Accounts {
    by_email: HashMap<String, Account>,
    nicknames: HashSet<String>,
}

#[derive(Default)]
pub struct AccountRegistry {
    accounts: RwLock<Accounts>,
    next_id: AtomicU64,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<Account, RegistrationError> {
        validate::validate_registration(email, password, nickname)?;
        let nickname = nickname.trim();

        // uniqueness checks and insert under one write lock
        let mut accounts = self.accounts.write();
        if accounts.by_email.contains_key(email) {
            return Err(RegistrationError::EmailTaken);
        }
        if accounts.nicknames.contains(nickname) {
            return Err(RegistrationError::NicknameTaken);
        }

        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            email: email.to_string(),
            nickname: nickname.to_string(),
        };
        accounts.nicknames.insert(account.nickname.clone());
        accounts
            .by_email
            .insert(account.email.clone(), account.clone());
        Ok(account)
    }

    pub fn len(&self) -> usize {
        self.accounts.read().by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
