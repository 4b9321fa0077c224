//! Deadline classification and compliance roll-ups.
//!
//! Every function here is pure: callers pass the evaluation date explicitly
//! (see [`crate::clock`]) and receive freshly computed values.

pub mod calendar;
mod classifier;
pub mod domain;
pub mod policy;
pub mod presentation;
mod summary;
pub mod views;

#[cfg(test)]
mod tests;

pub use calendar::{calendar_day_difference, parse_calendar_date, parse_optional_date};
pub use classifier::{classify, classify_raw, classify_with, DAYS_PER_YEAR};
pub use domain::{
    Criticality, DatedObligation, InvalidDateError, ObligationId, ObligationKind, PriorityHint,
    UrgencyClassification, UrgencyTier,
};
pub use policy::{DeadlinePolicy, DueSoonWindow};
pub use presentation::{effective_priority, label_for, Severity, TierLabel};
pub use summary::{
    classify_all, summarize, summarize_by_owner, summarize_with, ClassifiedObligation,
    ComplianceSummary, OwnerSummary,
};
