use super::classifier::classify_with;
use super::domain::{DatedObligation, InvalidDateError, UrgencyClassification, UrgencyTier};
use super::policy::DeadlinePolicy;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Tier counts for the obligations of one établissement or groupement.
///
/// All five counts sum to `total_obligations`. Overdue, due-soon, compliant and
/// not-applicable alone cover every obligation except commissions classified
/// as `Future`, which only `future_count` records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total_obligations: usize,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub compliant_count: usize,
    pub future_count: usize,
    pub not_applicable_count: usize,
    pub earliest_overdue: Option<DatedObligation>,
}

impl ComplianceSummary {
    fn record(&mut self, tier: UrgencyTier) {
        self.total_obligations += 1;
        match tier {
            UrgencyTier::Overdue => self.overdue_count += 1,
            UrgencyTier::DueSoon => self.due_soon_count += 1,
            UrgencyTier::Compliant => self.compliant_count += 1,
            UrgencyTier::Future => self.future_count += 1,
            UrgencyTier::NotApplicable => self.not_applicable_count += 1,
        }
    }

    pub fn count_for(&self, tier: UrgencyTier) -> usize {
        match tier {
            UrgencyTier::Overdue => self.overdue_count,
            UrgencyTier::DueSoon => self.due_soon_count,
            UrgencyTier::Compliant => self.compliant_count,
            UrgencyTier::Future => self.future_count,
            UrgencyTier::NotApplicable => self.not_applicable_count,
        }
    }

    /// Share of dated obligations that are not overdue, in percent.
    pub fn compliance_rate(&self) -> Option<f32> {
        let dated = self.total_obligations - self.not_applicable_count;
        if dated == 0 {
            return None;
        }

        let on_time = dated - self.overdue_count;
        Some(on_time as f32 / dated as f32 * 100.0)
    }

    /// Folds another entity's summary into this one (établissements into
    /// their groupement).
    pub fn merge(mut self, other: &ComplianceSummary) -> Self {
        self.total_obligations += other.total_obligations;
        self.overdue_count += other.overdue_count;
        self.due_soon_count += other.due_soon_count;
        self.compliant_count += other.compliant_count;
        self.future_count += other.future_count;
        self.not_applicable_count += other.not_applicable_count;

        if let Some(candidate) = &other.earliest_overdue {
            let replace = match &self.earliest_overdue {
                Some(current) => overdue_order(candidate, current) == Ordering::Less,
                None => true,
            };
            if replace {
                self.earliest_overdue = Some(candidate.clone());
            }
        }

        self
    }

    pub fn rollup<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplianceSummary>,
    {
        summaries
            .into_iter()
            .fold(ComplianceSummary::default(), |acc, summary| acc.merge(summary))
    }
}

/// Overdue obligations ordered most-late first: the earlier due date wins,
/// then the smaller id.
fn overdue_order(left: &DatedObligation, right: &DatedObligation) -> Ordering {
    left.due_date
        .cmp(&right.due_date)
        .then_with(|| left.id.cmp(&right.id))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedObligation {
    pub obligation: DatedObligation,
    pub classification: UrgencyClassification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub owner: String,
    pub summary: ComplianceSummary,
}

pub fn summarize<'a, I>(now: NaiveDate, obligations: I) -> Result<ComplianceSummary, InvalidDateError>
where
    I: IntoIterator<Item = &'a DatedObligation>,
{
    summarize_with(&DeadlinePolicy::default(), now, obligations)
}

/// Folds the classification of every obligation of a single owner.
///
/// The first invalid date aborts the fold and is returned as-is.
pub fn summarize_with<'a, I>(
    policy: &DeadlinePolicy,
    now: NaiveDate,
    obligations: I,
) -> Result<ComplianceSummary, InvalidDateError>
where
    I: IntoIterator<Item = &'a DatedObligation>,
{
    let mut summary = ComplianceSummary::default();
    let mut earliest: Option<(i64, &DatedObligation)> = None;

    for obligation in obligations {
        let classification = classify_with(policy, now, obligation.due_date, obligation.kind)?;
        summary.record(classification.tier);

        if let (UrgencyTier::Overdue, Some(delta)) =
            (classification.tier, classification.days_delta)
        {
            let replace = match earliest {
                Some((best_delta, best)) => delta
                    .cmp(&best_delta)
                    .then_with(|| overdue_order(obligation, best))
                    .is_lt(),
                None => true,
            };
            if replace {
                earliest = Some((delta, obligation));
            }
        }
    }

    summary.earliest_overdue = earliest.map(|(_, obligation)| obligation.clone());

    debug!(
        total = summary.total_obligations,
        overdue = summary.overdue_count,
        due_soon = summary.due_soon_count,
        "summarized obligations"
    );

    Ok(summary)
}

pub fn classify_all<'a, I>(
    policy: &DeadlinePolicy,
    now: NaiveDate,
    obligations: I,
) -> Result<Vec<ClassifiedObligation>, InvalidDateError>
where
    I: IntoIterator<Item = &'a DatedObligation>,
{
    obligations
        .into_iter()
        .map(|obligation| {
            classify_with(policy, now, obligation.due_date, obligation.kind).map(
                |classification| ClassifiedObligation {
                    obligation: obligation.clone(),
                    classification,
                },
            )
        })
        .collect()
}

/// Partitions a mixed collection by `owner` and summarises each partition,
/// ordered by owner.
pub fn summarize_by_owner<'a, I>(
    policy: &DeadlinePolicy,
    now: NaiveDate,
    obligations: I,
) -> Result<Vec<OwnerSummary>, InvalidDateError>
where
    I: IntoIterator<Item = &'a DatedObligation>,
{
    let mut partitions: BTreeMap<&str, Vec<&DatedObligation>> = BTreeMap::new();
    for obligation in obligations {
        partitions
            .entry(obligation.owner.as_str())
            .or_default()
            .push(obligation);
    }

    partitions
        .into_iter()
        .map(|(owner, members)| {
            summarize_with(policy, now, members).map(|summary| OwnerSummary {
                owner: owner.to_string(),
                summary,
            })
        })
        .collect()
}
