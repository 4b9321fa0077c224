//! Backend row projections and their mapping onto [`DatedObligation`].
//!
//! Field names follow the hosted database columns so rows can be deserialised
//! straight from query results.

use super::mapping::{criticality_from_text, is_closed_status, priority_from_text};
use super::ImportError;
use crate::deadlines::calendar::{ensure_supported, parse_optional_date};
use crate::deadlines::domain::{DatedObligation, InvalidDateError, ObligationId, ObligationKind};
use chrono::Months;
use serde::Deserialize;

/// Maps one backend row to an obligation; `None` means the row carries no
/// live deadline.
pub trait IntoObligation {
    fn into_obligation(self) -> Result<Option<DatedObligation>, ImportError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationRow {
    pub id: String,
    pub etablissement_id: String,
    #[serde(default)]
    pub libelle: Option<String>,
    #[serde(default)]
    pub date_derniere_verification: Option<String>,
    #[serde(default)]
    pub date_prochaine_verification: Option<String>,
    #[serde(default)]
    pub periodicite_mois: Option<u32>,
}

impl IntoObligation for VerificationRow {
    fn into_obligation(self) -> Result<Option<DatedObligation>, ImportError> {
        let last = parse_optional_date(
            "date_derniere_verification",
            self.date_derniere_verification.as_deref(),
        )?;
        let next = parse_optional_date(
            "date_prochaine_verification",
            self.date_prochaine_verification.as_deref(),
        )?;

        let due_date = match (next, last, self.periodicite_mois) {
            (Some(next), _, _) => Some(next),
            (None, Some(last), Some(months)) if months > 0 => {
                let derived = last.checked_add_months(Months::new(months)).ok_or(
                    InvalidDateError::OutOfRange {
                        field: "date_prochaine_verification",
                        date: last,
                    },
                )?;
                Some(ensure_supported("date_prochaine_verification", derived)?)
            }
            _ => None,
        };

        Ok(Some(DatedObligation {
            id: ObligationId(self.id),
            owner: self.etablissement_id,
            kind: ObligationKind::PeriodicVerification,
            label: self.libelle,
            reference_date: last,
            due_date,
            priority_hint: None,
            criticality: None,
        }))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrescriptionRow {
    pub id: String,
    pub etablissement_id: String,
    #[serde(default)]
    pub libelle: Option<String>,
    #[serde(default)]
    pub date_commission: Option<String>,
    #[serde(default)]
    pub date_echeance: Option<String>,
    #[serde(default)]
    pub priorite: Option<String>,
    #[serde(default)]
    pub criticite: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
}

impl IntoObligation for PrescriptionRow {
    fn into_obligation(self) -> Result<Option<DatedObligation>, ImportError> {
        if self.statut.as_deref().is_some_and(is_closed_status) {
            return Ok(None);
        }

        let reference_date = parse_optional_date("date_commission", self.date_commission.as_deref())?;
        let due_date = parse_optional_date("date_echeance", self.date_echeance.as_deref())?;
        let priority_hint = non_blank(self.priorite.as_deref())
            .map(|raw| {
                priority_from_text(raw).ok_or_else(|| ImportError::UnknownPriority(raw.to_string()))
            })
            .transpose()?;
        let criticality = non_blank(self.criticite.as_deref())
            .map(|raw| {
                criticality_from_text(raw)
                    .ok_or_else(|| ImportError::UnknownCriticality(raw.to_string()))
            })
            .transpose()?;

        Ok(Some(DatedObligation {
            id: ObligationId(self.id),
            owner: self.etablissement_id,
            kind: ObligationKind::Prescription,
            label: self.libelle,
            reference_date,
            due_date,
            priority_hint,
            criticality,
        }))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommissionRow {
    pub id: String,
    pub etablissement_id: String,
    #[serde(default)]
    pub libelle: Option<String>,
    #[serde(default)]
    pub date_derniere_commission: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl IntoObligation for CommissionRow {
    fn into_obligation(self) -> Result<Option<DatedObligation>, ImportError> {
        let reference_date = parse_optional_date(
            "date_derniere_commission",
            self.date_derniere_commission.as_deref(),
        )?;
        let due_date = parse_optional_date("date", self.date.as_deref())?;

        Ok(Some(DatedObligation {
            id: ObligationId(self.id),
            owner: self.etablissement_id,
            kind: ObligationKind::Commission,
            label: self.libelle,
            reference_date,
            due_date,
            priority_hint: None,
            criticality: None,
        }))
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Maps a batch of rows, dropping those without a live deadline.
pub fn obligations_from_rows<R, I>(rows: I) -> Result<Vec<DatedObligation>, ImportError>
where
    R: IntoObligation,
    I: IntoIterator<Item = R>,
{
    let mut obligations = Vec::new();
    for row in rows {
        if let Some(obligation) = row.into_obligation()? {
            obligations.push(obligation);
        }
    }
    Ok(obligations)
}
