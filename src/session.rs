use crate::credentials::CredentialStore;
use crate::error::Result;

/// Who is using the application. There is no way back to `LoggedOut` once
/// a login succeeds; the session ends with the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username } => Some(username),
            Session::LoggedOut => None,
        }
    }

    /// Makes sure the default account exists, then checks the credentials.
    /// A failed attempt leaves the session logged out.
    pub fn login(&mut self, store: &mut CredentialStore, username: &str, password: &str) -> Result<()> {
        if self.is_logged_in() {
            return Ok(());
        }
        store.ensure_default_account()?;
        store.authenticate(username, password)?;
        *self = Session::LoggedIn {
            username: username.trim().to_string(),
        };
        Ok(())
    }
}
