//! The module contains the errors the ledger can throw.
//!
//! The errors are:
//!
//! - [`EmptyName`] thrown when a person name is blank after trimming.
//! - [`UnknownPerson`] thrown when an adjustment targets a missing record.
//! - [`InvalidAmount`] thrown when an amount is not a finite decimal.
//!
//!  [`EmptyName`]: LedgerError::EmptyName
//!  [`UnknownPerson`]: LedgerError::UnknownPerson
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("\"{0}\" not found!")]
    UnknownPerson(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyName, Self::EmptyName) => true,
            (Self::UnknownPerson(a), Self::UnknownPerson(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
