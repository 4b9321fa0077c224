//! Read-model adapters turning backend rows and dashboard exports into
//! [`DatedObligation`] snapshots.

mod mapping;
mod parser;
pub mod rows;

use crate::deadlines::domain::{DatedObligation, InvalidDateError, ObligationKind};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub use parser::SnapshotRow;
pub use rows::{
    obligations_from_rows, CommissionRow, IntoObligation, PrescriptionRow, VerificationRow,
};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read obligation export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid obligation CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown obligation kind '{0}'")]
    UnknownKind(String),
    #[error("unknown priority '{0}'")]
    UnknownPriority(String),
    #[error("unknown criticality '{0}'")]
    UnknownCriticality(String),
    #[error(transparent)]
    Date(#[from] InvalidDateError),
}

/// Resolves free-text obligation kinds ("verification", "Commission de
/// sécurité", ...).
pub fn parse_kind(raw: &str) -> Result<ObligationKind, ImportError> {
    mapping::kind_from_text(raw).ok_or_else(|| ImportError::UnknownKind(raw.trim().to_string()))
}

pub struct ObligationImporter;

impl ObligationImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DatedObligation>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DatedObligation>, ImportError> {
        let rows = Self::rows_from_reader(reader)?;
        Self::from_rows(&rows)
    }

    /// Reads snapshot rows without converting them, so several sources can be
    /// concatenated before duplicate ids are resolved.
    pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<SnapshotRow>, ImportError> {
        Ok(parser::parse_rows(reader)?)
    }

    /// Converts snapshot rows, keeping the first occurrence of each id.
    pub fn from_rows(rows: &[SnapshotRow]) -> Result<Vec<DatedObligation>, ImportError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut obligations = Vec::with_capacity(rows.len());

        for row in rows {
            let obligation = row.to_obligation()?;
            if !seen.insert(obligation.id.to_string()) {
                warn!(id = %obligation.id, "duplicate obligation row ignored");
                continue;
            }
            obligations.push(obligation);
        }

        debug!(count = obligations.len(), "imported obligation snapshot");
        Ok(obligations)
    }
}
