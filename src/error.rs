//! Error types for the TDS engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a record file
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Payee category index or name outside the known set
    #[error("Invalid payee category: {value}")]
    InvalidCategory { value: String },

    /// Payment type index or name outside the known set
    #[error("Invalid payment type: {value}")]
    InvalidPaymentType { value: String },

    /// Amount that is not a non-negative decimal
    #[error("Invalid amount: {value}")]
    InvalidAmount { value: String },

    /// 1-based index outside `[1, len]`
    #[error("Invalid {entity} index {index}: expected 1-{len}")]
    IndexOutOfRange {
        entity: &'static str,
        index: usize,
        len: usize,
    },

    /// Edit, delete or payment attempted on an empty collection
    #[error("No {entity}s to edit/delete")]
    EmptyCollection { entity: &'static str },

    /// Backing file could not be opened for writing or appending
    #[error("Store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Salary selected for a company payee
    #[error("Salary payments cannot be made to a company")]
    SalaryForCompany,
}
