use chrono::{Duration, NaiveDate};

use crate::deadlines::domain::{DatedObligation, ObligationKind};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Evaluation date shared by the scenario tests.
pub(super) fn today() -> NaiveDate {
    date(2025, 1, 1)
}

pub(super) fn due_in(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(super) fn verification(id: &str, owner: &str, days: i64) -> DatedObligation {
    DatedObligation::new(id, owner, ObligationKind::PeriodicVerification, Some(due_in(days)))
}

pub(super) fn prescription(id: &str, owner: &str, days: i64) -> DatedObligation {
    DatedObligation::new(id, owner, ObligationKind::Prescription, Some(due_in(days)))
}

pub(super) fn commission(id: &str, owner: &str, days: i64) -> DatedObligation {
    DatedObligation::new(id, owner, ObligationKind::Commission, Some(due_in(days)))
}

pub(super) fn undated(id: &str, owner: &str, kind: ObligationKind) -> DatedObligation {
    DatedObligation::new(id, owner, kind, None)
}
