use std::path::{Path, PathBuf};

use crate::credentials::CredentialStore;
use crate::records::RecordStore;

pub const MARKS_FILE: &str = "marks.json";
pub const USERS_FILE: &str = "users.json";

/// Where the two backing files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub marks_file: PathBuf,
    pub users_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            marks_file: PathBuf::from(MARKS_FILE),
            users_file: PathBuf::from(USERS_FILE),
        }
    }
}

impl AppConfig {
    /// Both files directly inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        AppConfig {
            marks_file: dir.join(MARKS_FILE),
            users_file: dir.join(USERS_FILE),
        }
    }

    pub fn open_records(&self) -> RecordStore {
        RecordStore::open(&self.marks_file)
    }

    pub fn open_credentials(&self) -> CredentialStore {
        CredentialStore::open(&self.users_file)
    }
}
