use super::common::*;
use crate::deadlines::domain::{DatedObligation, InvalidDateError, ObligationKind, UrgencyTier};
use crate::deadlines::policy::DeadlinePolicy;
use crate::deadlines::summary::{
    classify_all, summarize, summarize_by_owner, summarize_with, ComplianceSummary,
};

#[test]
fn empty_input_yields_zeroed_summary() {
    let summary = summarize(today(), &Vec::<DatedObligation>::new()).expect("no dates to check");
    assert_eq!(summary, ComplianceSummary::default());
    assert_eq!(summary.total_obligations, 0);
    assert!(summary.earliest_overdue.is_none());
    assert_eq!(summary.compliance_rate(), None);
}

#[test]
fn most_overdue_obligation_is_surfaced() {
    let obligations = vec![
        verification("v-3", "etab-1", -3),
        verification("v-10", "etab-1", -10),
        verification("v-ok", "etab-1", 120),
    ];

    let summary = summarize(today(), &obligations).expect("valid dates");

    assert_eq!(summary.total_obligations, 3);
    assert_eq!(summary.overdue_count, 2);
    assert_eq!(summary.compliant_count, 1);
    assert_eq!(summary.due_soon_count, 0);
    let earliest = summary.earliest_overdue.expect("overdue present");
    assert_eq!(earliest.id.as_str(), "v-10");
}

#[test]
fn earliest_overdue_ties_break_on_id() {
    let obligations = vec![
        prescription("p-b", "etab-1", -5),
        verification("p-a", "etab-1", -5),
        prescription("p-c", "etab-1", -5),
    ];

    let summary = summarize(today(), &obligations).expect("valid dates");
    let earliest = summary.earliest_overdue.expect("overdue present");
    assert_eq!(earliest.id.as_str(), "p-a");

    let reversed: Vec<_> = obligations.into_iter().rev().collect();
    let again = summarize(today(), &reversed).expect("valid dates");
    assert_eq!(
        again.earliest_overdue.expect("overdue present").id.as_str(),
        "p-a"
    );
}

#[test]
fn counts_always_sum_to_input_length() {
    let obligations = vec![
        verification("v1", "etab-1", -400),
        verification("v2", "etab-1", 10),
        verification("v3", "etab-1", 90),
        prescription("p1", "etab-1", 7),
        prescription("p2", "etab-1", 8),
        commission("c1", "etab-1", 200),
        undated("u1", "etab-1", ObligationKind::Prescription),
    ];

    let summary = summarize(today(), &obligations).expect("valid dates");
    let counted: usize = UrgencyTier::ordered()
        .into_iter()
        .map(|tier| summary.count_for(tier))
        .sum();

    assert_eq!(counted, obligations.len());
    assert_eq!(summary.total_obligations, obligations.len());
    assert_eq!(summary.overdue_count, 1);
    assert_eq!(summary.due_soon_count, 2);
    assert_eq!(summary.compliant_count, 2);
    assert_eq!(summary.future_count, 1);
    assert_eq!(summary.not_applicable_count, 1);
}

#[test]
fn summary_is_idempotent() {
    let obligations = vec![
        prescription("p1", "etab-1", -2),
        verification("v1", "etab-1", 12),
    ];
    let first = summarize(today(), &obligations).expect("valid dates");
    let second = summarize(today(), &obligations).expect("valid dates");
    assert_eq!(first, second);
}

#[test]
fn invalid_date_propagates_unchanged() {
    let broken = DatedObligation::new(
        "v-bad",
        "etab-1",
        ObligationKind::PeriodicVerification,
        Some(date(1, 1, 1)),
    );
    let obligations = vec![verification("v1", "etab-1", 5), broken];

    let error = summarize(today(), &obligations).expect_err("sentinel date");
    assert_eq!(
        error,
        InvalidDateError::OutOfRange {
            field: "due_date",
            date: date(1, 1, 1),
        }
    );
}

#[test]
fn compliance_rate_ignores_undated_obligations() {
    let obligations = vec![
        verification("v1", "etab-1", -1),
        verification("v2", "etab-1", 100),
        verification("v3", "etab-1", 10),
        verification("v4", "etab-1", 200),
        undated("u1", "etab-1", ObligationKind::PeriodicVerification),
    ];

    let summary = summarize(today(), &obligations).expect("valid dates");
    assert_eq!(summary.compliance_rate(), Some(75.0));
}

#[test]
fn owners_are_summarised_separately_and_roll_up() {
    let obligations = vec![
        verification("v1", "etab-b", -20),
        prescription("p1", "etab-a", 3),
        verification("v2", "etab-a", -2),
        commission("c1", "etab-b", 90),
    ];

    let owners =
        summarize_by_owner(&DeadlinePolicy::default(), today(), &obligations).expect("valid dates");
    let names: Vec<_> = owners.iter().map(|entry| entry.owner.as_str()).collect();
    assert_eq!(names, ["etab-a", "etab-b"]);

    let etab_a = &owners[0].summary;
    assert_eq!(etab_a.total_obligations, 2);
    assert_eq!(etab_a.overdue_count, 1);
    assert_eq!(etab_a.due_soon_count, 1);

    let groupement = ComplianceSummary::rollup(owners.iter().map(|entry| &entry.summary));
    let direct = summarize(today(), &obligations).expect("valid dates");
    assert_eq!(groupement, direct);
    assert_eq!(
        groupement.earliest_overdue.expect("overdue present").id.as_str(),
        "v1"
    );
}

#[test]
fn classify_all_keeps_input_order() {
    let obligations = vec![
        prescription("p1", "etab-1", 20),
        verification("v1", "etab-1", -1),
    ];

    let items =
        classify_all(&DeadlinePolicy::default(), today(), &obligations).expect("valid dates");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].obligation.id.as_str(), "p1");
    assert_eq!(items[0].classification.tier, UrgencyTier::Compliant);
    assert_eq!(items[1].classification.tier, UrgencyTier::Overdue);
}

#[test]
fn summarize_with_applies_custom_windows() {
    let obligations = vec![verification("v1", "etab-1", 75)];
    let policy = DeadlinePolicy::default().with_verification_days(90);

    let summary = summarize_with(&policy, today(), &obligations).expect("valid dates");
    assert_eq!(summary.due_soon_count, 1);
    assert_eq!(summary.compliant_count, 0);
}

#[test]
fn distant_commissions_fall_outside_the_four_status_counts() {
    let obligations = vec![
        commission("c-near", "etab-1", 12),
        commission("c-far", "etab-1", 31),
        verification("v1", "etab-1", -3),
        undated("u1", "etab-1", ObligationKind::Commission),
    ];

    let summary = summarize(today(), &obligations).expect("valid dates");
    let four_statuses = summary.overdue_count
        + summary.due_soon_count
        + summary.compliant_count
        + summary.not_applicable_count;

    assert_eq!(summary.future_count, 1);
    assert_eq!(four_statuses, obligations.len() - summary.future_count);
}
