use thiserror::Error;

use crate::domain::ParseDirectionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Transaction not found: {0}")]
    NotFound(String),
}

impl From<ParseDirectionError> for LedgerError {
    fn from(err: ParseDirectionError) -> Self {
        LedgerError::InvalidTransaction(err.to_string())
    }
}
