use super::calendar::{
    calendar_day_difference, ensure_supported, parse_calendar_date, parse_optional_date,
};
use super::domain::{InvalidDateError, ObligationKind, UrgencyClassification, UrgencyTier};
use super::policy::DeadlinePolicy;
use chrono::NaiveDate;
use tracing::trace;

pub const DAYS_PER_YEAR: i64 = 365;

/// Classifies a due date against `now` with the default thresholds.
pub fn classify(
    now: NaiveDate,
    due_date: Option<NaiveDate>,
    kind: ObligationKind,
) -> Result<UrgencyClassification, InvalidDateError> {
    classify_with(&DeadlinePolicy::default(), now, due_date, kind)
}

pub fn classify_with(
    policy: &DeadlinePolicy,
    now: NaiveDate,
    due_date: Option<NaiveDate>,
    kind: ObligationKind,
) -> Result<UrgencyClassification, InvalidDateError> {
    let now = ensure_supported("today", now)?;
    let Some(due_date) = due_date else {
        return Ok(UrgencyClassification::not_applicable());
    };
    let due_date = ensure_supported("due_date", due_date)?;

    let days_delta = calendar_day_difference(due_date, now);
    let tier = policy.tier_for(kind, days_delta);
    let years_late = years_late(days_delta);
    let label = delta_label(tier, days_delta, years_late);

    trace!(?kind, %due_date, %now, days_delta, ?tier, "classified obligation");

    Ok(UrgencyClassification {
        tier,
        days_delta: Some(days_delta),
        years_late,
        label,
    })
}

/// String entry point for callers holding raw backend values.
pub fn classify_raw(
    now: &str,
    due_date: Option<&str>,
    kind: ObligationKind,
) -> Result<UrgencyClassification, InvalidDateError> {
    let now = parse_calendar_date("today", now)?;
    let due_date = parse_optional_date("due_date", due_date)?;
    classify(now, due_date, kind)
}

fn years_late(days_delta: i64) -> Option<i64> {
    let late = days_delta.checked_neg().filter(|late| *late > DAYS_PER_YEAR)?;
    Some(late / DAYS_PER_YEAR)
}

fn delta_label(tier: UrgencyTier, days_delta: i64, years_late: Option<i64>) -> String {
    match tier {
        UrgencyTier::Overdue => {
            let late = day_count(days_delta.unsigned_abs());
            match years_late {
                Some(years) => format!(
                    "Retard de {late} (plus de {years} an{})",
                    if years > 1 { "s" } else { "" }
                ),
                None => format!("Retard de {late}"),
            }
        }
        UrgencyTier::DueSoon if days_delta == 0 => "Échéance aujourd'hui".to_string(),
        UrgencyTier::DueSoon => format!("Échéance dans {}", day_count(days_delta.unsigned_abs())),
        UrgencyTier::Compliant => format!(
            "{} restant{}",
            day_count(days_delta.unsigned_abs()),
            if days_delta > 1 { "s" } else { "" }
        ),
        UrgencyTier::Future => format!("Dans {}", day_count(days_delta.unsigned_abs())),
        UrgencyTier::NotApplicable => "Non renseigné".to_string(),
    }
}

fn day_count(days: u64) -> String {
    if days == 1 {
        "1 jour".to_string()
    } else {
        format!("{days} jours")
    }
}
