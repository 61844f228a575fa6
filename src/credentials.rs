//! Login credentials, kept as a plain username to password map in a JSON
//! object file. Passwords are stored as typed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, StoreError, ValidationError};
use crate::storage;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "1234";

pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, String>,
}

impl CredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = storage::load_or_default(&path);
        CredentialStore { path, users }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Picks up changes another window or process wrote to the file.
    pub fn reload(&mut self) {
        self.users = storage::load_or_default(&self.path);
    }

    pub fn save(&self) -> Result<()> {
        storage::save_pretty(&self.path, &self.users)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn password_for(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Reloads, then adds `admin` / `1234` when there is no `admin` entry.
    /// Returns whether the account had to be created.
    pub fn ensure_default_account(&mut self) -> Result<bool> {
        self.reload();
        if self.contains(DEFAULT_USERNAME) {
            return Ok(false);
        }
        self.insert(DEFAULT_USERNAME.to_string(), DEFAULT_PASSWORD.to_string())?;
        info!(username = DEFAULT_USERNAME, "created default account");
        Ok(true)
    }

    /// Adds a new account. Usernames are compared exactly, case included.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }

        self.reload();
        if self.contains(username) {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }
        self.insert(username.to_string(), password.to_string())?;
        info!(username, "registered user");
        Ok(())
    }

    /// Checks a username/password pair. Unknown users and wrong passwords
    /// both come back as [`StoreError::InvalidLogin`].
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        let password = password.trim();

        self.reload();
        match self.password_for(username) {
            Some(stored) if stored == password => {
                info!(username, "login succeeded");
                Ok(())
            }
            _ => {
                warn!(username, "login failed");
                Err(StoreError::InvalidLogin)
            }
        }
    }

    fn insert(&mut self, username: String, password: String) -> Result<()> {
        let key = username.clone();
        self.users.insert(username, password);
        if let Err(e) = self.save() {
            self.users.remove(&key);
            return Err(e);
        }
        Ok(())
    }
}
