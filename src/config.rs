//! Location of the record files.
//!
//! ## Resolution Order
//!
//! 1. An explicit directory (the CLI `--data-dir` flag)
//! 2. `TDS_DATA_DIR` environment variable
//! 3. The current directory

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "TDS_DATA_DIR";

pub const PAYEES_FILE: &str = "payees.txt";
pub const PAYERS_FILE: &str = "payers.txt";
pub const LEDGER_FILE: &str = "tds_records.txt";

/// Paths of the payee, payer and certificate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorePaths {
            data_dir: data_dir.into(),
        }
    }

    /// Uses `TDS_DATA_DIR` if set and non-empty, otherwise the current directory.
    pub fn from_env() -> Self {
        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::new("."),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn payees_file(&self) -> PathBuf {
        self.data_dir.join(PAYEES_FILE)
    }

    pub fn payers_file(&self) -> PathBuf {
        self.data_dir.join(PAYERS_FILE)
    }

    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }
}
