use thiserror::Error;

/// Problems with the raw field values captured by a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields required: {0} is empty")]
    MissingField(&'static str),

    #[error("Invalid mark {0:?}: expected a whole number from 0 to 100")]
    InvalidMark(String),

    #[error("Username is required")]
    EmptyUsername,
}

/// Every failure a record or credential store operation can report.
///
/// None of these are fatal: the caller shows the message and carries on.
/// A corrupt backing file is deliberately absent here, it loads as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("User exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid login")]
    InvalidLogin,

    #[error("No student IDs left to issue")]
    IdsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
