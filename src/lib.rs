pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod records;
pub mod session;
pub mod storage;
pub mod utils;

pub use error::{Result, StoreError, ValidationError};
