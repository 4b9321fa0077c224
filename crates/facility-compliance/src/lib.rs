//! Regulatory deadline and compliance-status computation for facility safety
//! inspections (verifications, commission prescriptions, commission dates).

pub mod clock;
pub mod config;
pub mod deadlines;
pub mod error;
pub mod records;
pub mod telemetry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use deadlines::{
    classify, classify_raw, classify_with, label_for, summarize, summarize_by_owner,
    summarize_with, ComplianceSummary, DatedObligation, DeadlinePolicy, InvalidDateError,
    ObligationKind, UrgencyClassification, UrgencyTier,
};
