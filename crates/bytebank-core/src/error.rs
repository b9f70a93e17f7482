use std::io;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("Amount out of range: the balance would no longer be a finite number")]
    AmountOutOfRange,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
