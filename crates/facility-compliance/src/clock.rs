use chrono::{Local, NaiveDate};

/// Source of the evaluation date used by every deadline computation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Prefer an explicit date (CLI flag, request field) over the clock.
    fn today_or(&self, requested: Option<NaiveDate>) -> NaiveDate {
        requested.unwrap_or_else(|| self.today())
    }
}

/// Local wall clock, truncated to the calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub const fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
