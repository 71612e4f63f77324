//! File-backed payee and payer collections and the certificate ledger.
//!
//! Record files are headerless comma-separated text, one record per line:
//!
//! - payees: `name,taxId,categoryIndex`
//! - payers: `name,taxId,deductorId`
//!
//! Saving always rewrites the whole file through a temp file and rename.
//! The ledger is only ever appended to.

use crate::certificate::Certificate;
use crate::config::StorePaths;
use crate::error::{EngineError, Result};
use crate::model::{Payee, PayeeCategory, Payer};
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// One line of the payee file.
#[derive(Debug, Serialize, Deserialize)]
struct PayeeRow {
    name: String,
    tax_id: String,
    category: String,
}

impl PayeeRow {
    fn into_payee(self) -> Result<Payee> {
        let raw = self.category.trim();
        let index = raw.parse::<u8>().map_err(|_| EngineError::InvalidCategory {
            value: raw.to_string(),
        })?;
        Ok(Payee::new(self.name, self.tax_id, PayeeCategory::try_from(index)?))
    }
}

impl From<&Payee> for PayeeRow {
    fn from(payee: &Payee) -> Self {
        PayeeRow {
            name: payee.name.clone(),
            tax_id: payee.tax_id.clone(),
            category: payee.category.index().to_string(),
        }
    }
}

/// One line of the payer file.
#[derive(Debug, Serialize, Deserialize)]
struct PayerRow {
    name: String,
    tax_id: String,
    deductor_id: String,
}

impl From<PayerRow> for Payer {
    fn from(row: PayerRow) -> Self {
        Payer::new(row.name, row.tax_id, row.deductor_id)
    }
}

impl From<&Payer> for PayerRow {
    fn from(payer: &Payer) -> Self {
        PayerRow {
            name: payer.name.clone(),
            tax_id: payer.tax_id.clone(),
            deductor_id: payer.deductor_id.clone(),
        }
    }
}

/// Durable storage for the master records and the certificate ledger.
#[derive(Debug, Clone)]
pub struct RecordStore {
    paths: StorePaths,
}

impl RecordStore {
    pub fn new(paths: StorePaths) -> Self {
        RecordStore { paths }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Loads all payees in file order. A missing file yields an empty list.
    pub fn load_payees(&self) -> Result<Vec<Payee>> {
        read_rows::<PayeeRow>(&self.paths.payees_file())?
            .into_iter()
            .map(PayeeRow::into_payee)
            .collect()
    }

    /// Loads all payers in file order. A missing file yields an empty list.
    pub fn load_payers(&self) -> Result<Vec<Payer>> {
        let rows = read_rows::<PayerRow>(&self.paths.payers_file())?;
        Ok(rows.into_iter().map(Payer::from).collect())
    }

    /// Replaces the payee file with `payees`.
    pub fn save_payees(&self, payees: &[Payee]) -> Result<()> {
        let path = self.paths.payees_file();
        write_rows(&path, payees.iter().map(PayeeRow::from))?;
        info!("Saved {} payees to {}", payees.len(), path.display());
        Ok(())
    }

    /// Replaces the payer file with `payers`.
    pub fn save_payers(&self, payers: &[Payer]) -> Result<()> {
        let path = self.paths.payers_file();
        write_rows(&path, payers.iter().map(PayerRow::from))?;
        info!("Saved {} payers to {}", payers.len(), path.display());
        Ok(())
    }

    /// Appends the rendered certificate to the ledger, creating it if needed.
    pub fn append_certificate(&self, certificate: &Certificate) -> Result<()> {
        let path = self.paths.ledger_file();
        ensure_parent_dir(&path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| unavailable(&path, source))?;
        file.write_all(certificate.to_string().as_bytes())
            .map_err(|source| unavailable(&path, source))?;

        debug!("Appended {} to {}", certificate.form, path.display());
        Ok(())
    }

    /// Returns the ledger text, or `None` when there are no records.
    ///
    /// An unreadable ledger is logged and reported as no records.
    pub fn list_certificates(&self) -> Option<String> {
        let path = self.paths.ledger_file();
        match fs::read_to_string(&path) {
            Ok(text) if text.is_empty() => None,
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Cannot read ledger {}: {}", path.display(), e);
                None
            }
        }
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            warn!("Cannot open {}: {}; starting empty", path.display(), e);
            return Ok(Vec::new());
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                if let csv::ErrorKind::Io(source) = e.kind() {
                    warn!("Cannot read {}: {}; starting empty", path.display(), source);
                    return Ok(Vec::new());
                }
                return Err(e.into());
            }
        }
    }
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Writes `rows` to a sibling temp file, syncs it, then renames it over `path`.
fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    ensure_parent_dir(path)?;

    let temp_path = temp_path_for(path);
    if let Err(e) = write_temp(&temp_path, rows) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        unavailable(path, source)
    })
}

fn write_temp<T: Serialize>(temp_path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let file = File::create(temp_path).map_err(|source| unavailable(temp_path, source))?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| unavailable(temp_path, e.into_error()))?;
    file.sync_all().map_err(|source| unavailable(temp_path, source))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| unavailable(parent, source))
        }
        _ => Ok(()),
    }
}

fn unavailable(path: &Path, source: io::Error) -> EngineError {
    EngineError::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    }
}
