//! Unit database loader
//!
//! The database is a UTF-8 CSV file with a header row. Recognised columns:
//! `Symbol`, `Alternate Symbol`, `s`, `m`, `kg`, `mol`, `C`, `K`, `cd`,
//! `COEFF`. Other columns (names, descriptions) are ignored. Blank numeric
//! fields are 0 and a blank alternate symbol means there is none.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use basis_core::{parse_decimal, NumberError};
use crate::{Dimension, UnitEntry, UnitTable};

/// Errors that can occur while loading a unit database
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read unit database {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing symbol")]
    MissingSymbol { line: u64 },

    #[error("line {line}: field '{field}': {source}")]
    InvalidField {
        line: u64,
        field: &'static str,
        #[source]
        source: NumberError,
    },
}

/// Raw row as it appears in the file; numbers are parsed afterwards so a bad
/// field can be reported by name.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Symbol", default)]
    symbol: String,
    #[serde(rename = "Alternate Symbol", default)]
    alternate: String,
    #[serde(default)]
    s: String,
    #[serde(default)]
    m: String,
    #[serde(default)]
    kg: String,
    #[serde(default)]
    mol: String,
    #[serde(rename = "C", default)]
    coulomb: String,
    #[serde(rename = "K", default)]
    kelvin: String,
    #[serde(default)]
    cd: String,
    #[serde(rename = "COEFF", default)]
    coeff: String,
}

impl CsvRow {
    fn into_entry(self, line: u64) -> Result<UnitEntry, LoadError> {
        if self.symbol.is_empty() {
            return Err(LoadError::MissingSymbol { line });
        }

        let number = |field: &'static str, text: &str| -> Result<f64, LoadError> {
            if text.is_empty() {
                return Ok(0.0);
            }
            parse_decimal(text).map_err(|source| LoadError::InvalidField { line, field, source })
        };

        let dimension = Dimension::new([
            number("s", &self.s)?,
            number("m", &self.m)?,
            number("kg", &self.kg)?,
            number("mol", &self.mol)?,
            number("C", &self.coulomb)?,
            number("K", &self.kelvin)?,
            number("cd", &self.cd)?,
        ]);
        let coefficient = number("COEFF", &self.coeff)?;

        let entry = UnitEntry::new(&self.symbol, dimension, coefficient);
        Ok(if self.alternate.is_empty() {
            entry
        } else {
            entry.with_alternate(&self.alternate)
        })
    }
}

impl UnitTable {
    /// Load a unit database from a file
    pub fn load(path: impl AsRef<Path>) -> Result<UnitTable, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_csv_str(&content)?;
        debug!("loaded {} units from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a unit database held in memory
    pub fn from_csv_str(content: &str) -> Result<UnitTable, LoadError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self::from_csv_reader(content.as_bytes())
    }

    /// Parse a unit database from any reader
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<UnitTable, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            if record.iter().all(str::is_empty) {
                continue;
            }

            let row: CsvRow = record.deserialize(Some(&headers))?;
            entries.push(row.into_entry(line)?);
        }

        Ok(UnitTable::new(entries))
    }
}
