use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObligationId(pub String);

impl ObligationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObligationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    PeriodicVerification,
    Prescription,
    Commission,
}

impl ObligationKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::PeriodicVerification, Self::Prescription, Self::Commission]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PeriodicVerification => "Vérification périodique",
            Self::Prescription => "Prescription",
            Self::Commission => "Commission de sécurité",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityHint {
    Urgent,
    Haute,
    Normale,
    Basse,
}

impl PriorityHint {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Haute => "Haute",
            Self::Normale => "Normale",
            Self::Basse => "Basse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Critique,
    Majeure,
    Mineure,
}

impl Criticality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critique => "Critique",
            Self::Majeure => "Majeure",
            Self::Mineure => "Mineure",
        }
    }
}

/// A time-bound regulatory obligation, as loaded from the backend.
///
/// `owner` identifies the établissement the obligation belongs to; it is only
/// read when partitioning a mixed collection per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedObligation {
    pub id: ObligationId,
    pub owner: String,
    pub kind: ObligationKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority_hint: Option<PriorityHint>,
    #[serde(default)]
    pub criticality: Option<Criticality>,
}

impl DatedObligation {
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        kind: ObligationKind,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: ObligationId::new(id),
            owner: owner.into(),
            kind,
            label: None,
            reference_date: None,
            due_date,
            priority_hint: None,
            criticality: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_priority(mut self, priority: PriorityHint) -> Self {
        self.priority_hint = Some(priority);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Overdue,
    DueSoon,
    Compliant,
    Future,
    NotApplicable,
}

impl UrgencyTier {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Overdue,
            Self::DueSoon,
            Self::Compliant,
            Self::Future,
            Self::NotApplicable,
        ]
    }
}

/// Computed status of one obligation; recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrgencyClassification {
    pub tier: UrgencyTier,
    pub days_delta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_late: Option<i64>,
    pub label: String,
}

impl UrgencyClassification {
    pub fn not_applicable() -> Self {
        Self {
            tier: UrgencyTier::NotApplicable,
            days_delta: None,
            years_late: None,
            label: "Non renseigné".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDateError {
    #[error("{field}: '{value}' is not a recognised calendar date")]
    Unparsable { field: &'static str, value: String },
    #[error("{field}: {date} lies outside the supported calendar window")]
    OutOfRange { field: &'static str, date: NaiveDate },
}

impl InvalidDateError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Unparsable { field, .. } | Self::OutOfRange { field, .. } => *field,
        }
    }
}
