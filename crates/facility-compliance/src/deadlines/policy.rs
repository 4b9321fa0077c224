use super::domain::{ObligationKind, UrgencyTier};

pub const VERIFICATION_DUE_SOON_DAYS: u32 = 60;
pub const PRESCRIPTION_DUE_SOON_DAYS: u32 = 7;
pub const COMMISSION_DUE_SOON_DAYS: u32 = 30;

/// The "échéance proche" window that follows a due date's approach.
///
/// Verification windows exclude their last day (`0 <= delta < 60`), while
/// prescription and commission windows include it (`0 <= delta <= 7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueSoonWindow {
    days: u32,
    inclusive: bool,
}

impl DueSoonWindow {
    pub const fn exclusive(days: u32) -> Self {
        Self {
            days,
            inclusive: false,
        }
    }

    pub const fn inclusive(days: u32) -> Self {
        Self {
            days,
            inclusive: true,
        }
    }

    pub const fn days(&self) -> u32 {
        self.days
    }

    pub const fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    pub fn contains(&self, days_delta: i64) -> bool {
        let limit = i64::from(self.days);
        if days_delta < 0 {
            false
        } else if self.inclusive {
            days_delta <= limit
        } else {
            days_delta < limit
        }
    }

    fn resized(self, days: u32) -> Self {
        Self { days, ..self }
    }
}

/// Threshold table selecting the urgency tier for each obligation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    verification: DueSoonWindow,
    prescription: DueSoonWindow,
    commission: DueSoonWindow,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            verification: DueSoonWindow::exclusive(VERIFICATION_DUE_SOON_DAYS),
            prescription: DueSoonWindow::inclusive(PRESCRIPTION_DUE_SOON_DAYS),
            commission: DueSoonWindow::inclusive(COMMISSION_DUE_SOON_DAYS),
        }
    }
}

impl DeadlinePolicy {
    pub fn with_verification_days(mut self, days: u32) -> Self {
        self.verification = self.verification.resized(days);
        self
    }

    pub fn with_prescription_days(mut self, days: u32) -> Self {
        self.prescription = self.prescription.resized(days);
        self
    }

    pub fn with_commission_days(mut self, days: u32) -> Self {
        self.commission = self.commission.resized(days);
        self
    }

    pub fn window_for(&self, kind: ObligationKind) -> DueSoonWindow {
        match kind {
            ObligationKind::PeriodicVerification => self.verification,
            ObligationKind::Prescription => self.prescription,
            ObligationKind::Commission => self.commission,
        }
    }

    /// Tier for a known day delta; total over every `i64`.
    pub fn tier_for(&self, kind: ObligationKind, days_delta: i64) -> UrgencyTier {
        if days_delta < 0 {
            UrgencyTier::Overdue
        } else if self.window_for(kind).contains(days_delta) {
            UrgencyTier::DueSoon
        } else {
            match kind {
                ObligationKind::Commission => UrgencyTier::Future,
                ObligationKind::PeriodicVerification | ObligationKind::Prescription => {
                    UrgencyTier::Compliant
                }
            }
        }
    }
}
