use super::domain::{
    Criticality, DatedObligation, ObligationKind, PriorityHint, UrgencyClassification, UrgencyTier,
};
use super::presentation::{effective_priority, label_for, Severity};
use super::summary::{ClassifiedObligation, ComplianceSummary, OwnerSummary};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationView {
    pub tier: UrgencyTier,
    pub tier_label: &'static str,
    pub severity: Severity,
    pub days_delta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_late: Option<i64>,
    pub delay_label: String,
}

impl From<&UrgencyClassification> for ClassificationView {
    fn from(classification: &UrgencyClassification) -> Self {
        let presentation = label_for(classification.tier);
        Self {
            tier: classification.tier,
            tier_label: presentation.text,
            severity: presentation.severity,
            days_delta: classification.days_delta,
            years_late: classification.years_late,
            delay_label: classification.label.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObligationView {
    pub id: String,
    pub owner: String,
    pub kind: ObligationKind,
    pub kind_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub reference_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub priority: PriorityHint,
    pub priority_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
    pub status: ClassificationView,
}

impl From<&ClassifiedObligation> for ObligationView {
    fn from(item: &ClassifiedObligation) -> Self {
        let obligation = &item.obligation;
        let priority = effective_priority(&item.classification, obligation.priority_hint);
        Self {
            id: obligation.id.to_string(),
            owner: obligation.owner.clone(),
            kind: obligation.kind,
            kind_label: obligation.kind.label(),
            label: obligation.label.clone(),
            reference_date: obligation.reference_date,
            due_date: obligation.due_date,
            priority,
            priority_label: priority.label(),
            criticality: obligation.criticality,
            status: ClassificationView::from(&item.classification),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EarliestOverdueView {
    pub id: String,
    pub kind: ObligationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl From<&DatedObligation> for EarliestOverdueView {
    fn from(obligation: &DatedObligation) -> Self {
        Self {
            id: obligation.id.to_string(),
            kind: obligation.kind,
            label: obligation.label.clone(),
            due_date: obligation.due_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub total_obligations: usize,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub compliant_count: usize,
    pub future_count: usize,
    pub not_applicable_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_rate: Option<f32>,
    pub status: &'static str,
    pub severity: Severity,
    pub earliest_overdue: Option<EarliestOverdueView>,
}

impl SummaryView {
    pub fn new(owner: Option<String>, summary: &ComplianceSummary) -> Self {
        let worst = UrgencyTier::ordered()
            .into_iter()
            .find(|tier| summary.count_for(*tier) > 0)
            .unwrap_or(UrgencyTier::NotApplicable);
        let presentation = label_for(worst);

        Self {
            owner,
            total_obligations: summary.total_obligations,
            overdue_count: summary.overdue_count,
            due_soon_count: summary.due_soon_count,
            compliant_count: summary.compliant_count,
            future_count: summary.future_count,
            not_applicable_count: summary.not_applicable_count,
            compliance_rate: summary.compliance_rate(),
            status: presentation.text,
            severity: presentation.severity,
            earliest_overdue: summary
                .earliest_overdue
                .as_ref()
                .map(EarliestOverdueView::from),
        }
    }
}

impl From<&OwnerSummary> for SummaryView {
    fn from(entry: &OwnerSummary) -> Self {
        Self::new(Some(entry.owner.clone()), &entry.summary)
    }
}
