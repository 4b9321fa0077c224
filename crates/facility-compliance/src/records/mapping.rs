use crate::deadlines::domain::{Criticality, ObligationKind, PriorityHint};

/// Folds backend free text to a comparable key: no BOM, no accents, single
/// spaces, lowercase.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned: String = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .map(fold_accent)
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'À' | 'Â' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'î' | 'ï' => 'i',
        'Î' | 'Ï' => 'I',
        'ô' | 'ö' => 'o',
        'Ô' | 'Ö' => 'O',
        'ù' | 'û' | 'ü' => 'u',
        'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        '_' | '-' => ' ',
        other => other,
    }
}

pub(crate) fn kind_from_text(value: &str) -> Option<ObligationKind> {
    match normalize_text(value).as_str() {
        "verification" | "verification periodique" | "periodic verification" => {
            Some(ObligationKind::PeriodicVerification)
        }
        "prescription" => Some(ObligationKind::Prescription),
        "commission" | "commission de securite" => Some(ObligationKind::Commission),
        _ => None,
    }
}

pub(crate) fn priority_from_text(value: &str) -> Option<PriorityHint> {
    match normalize_text(value).as_str() {
        "urgent" | "urgente" => Some(PriorityHint::Urgent),
        "haute" | "haut" | "elevee" => Some(PriorityHint::Haute),
        "normale" | "normal" | "moyenne" => Some(PriorityHint::Normale),
        "basse" | "bas" | "faible" => Some(PriorityHint::Basse),
        _ => None,
    }
}

pub(crate) fn criticality_from_text(value: &str) -> Option<Criticality> {
    match normalize_text(value).as_str() {
        "critique" => Some(Criticality::Critique),
        "majeure" | "majeur" => Some(Criticality::Majeure),
        "mineure" | "mineur" => Some(Criticality::Mineure),
        _ => None,
    }
}

/// Prescriptions lifted or cancelled no longer carry a deadline.
pub(crate) fn is_closed_status(value: &str) -> bool {
    matches!(
        normalize_text(value).as_str(),
        "levee" | "resolue" | "realisee" | "annulee" | "cloturee"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_spacing() {
        assert_eq!(
            normalize_text("\u{feff}Commission  de   Sécurité"),
            "commission de securite"
        );
        assert_eq!(normalize_text("periodic_verification"), "periodic verification");
    }

    #[test]
    fn recognises_french_and_code_spellings() {
        assert_eq!(
            kind_from_text("periodic_verification"),
            Some(ObligationKind::PeriodicVerification)
        );
        assert_eq!(
            kind_from_text("Vérification périodique"),
            Some(ObligationKind::PeriodicVerification)
        );
        assert_eq!(kind_from_text("audit"), None);

        assert_eq!(priority_from_text(" URGENTE "), Some(PriorityHint::Urgent));
        assert_eq!(priority_from_text("Élevée"), Some(PriorityHint::Haute));
        assert_eq!(criticality_from_text("Majeure"), Some(Criticality::Majeure));
        assert_eq!(criticality_from_text("grave"), None);
    }

    #[test]
    fn closed_statuses_cover_lifted_and_cancelled() {
        assert!(is_closed_status("Levée"));
        assert!(is_closed_status("annulée"));
        assert!(!is_closed_status("en cours"));
        assert!(!is_closed_status("à faire"));
    }
}
