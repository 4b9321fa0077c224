use super::domain::{PriorityHint, UrgencyClassification, UrgencyTier};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
    None,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Élevée",
            Self::Medium => "Moyenne",
            Self::Low => "Faible",
            Self::None => "Aucune",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierLabel {
    pub severity: Severity,
    pub text: &'static str,
}

pub const fn label_for(tier: UrgencyTier) -> TierLabel {
    match tier {
        UrgencyTier::Overdue => TierLabel {
            severity: Severity::High,
            text: "En retard",
        },
        UrgencyTier::DueSoon => TierLabel {
            severity: Severity::Medium,
            text: "Échéance proche",
        },
        UrgencyTier::Compliant => TierLabel {
            severity: Severity::Low,
            text: "Conforme",
        },
        UrgencyTier::Future => TierLabel {
            severity: Severity::Low,
            text: "À venir",
        },
        UrgencyTier::NotApplicable => TierLabel {
            severity: Severity::None,
            text: "Non renseigné",
        },
    }
}

/// Stored priority when the record has one, otherwise one derived from the
/// computed tier.
pub fn effective_priority(
    classification: &UrgencyClassification,
    hint: Option<PriorityHint>,
) -> PriorityHint {
    hint.unwrap_or(match classification.tier {
        UrgencyTier::Overdue => PriorityHint::Urgent,
        UrgencyTier::DueSoon => PriorityHint::Haute,
        UrgencyTier::Compliant | UrgencyTier::Future => PriorityHint::Normale,
        UrgencyTier::NotApplicable => PriorityHint::Basse,
    })
}
