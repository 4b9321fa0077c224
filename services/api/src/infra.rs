use chrono::NaiveDate;
use facility_compliance::deadlines::{parse_calendar_date, DeadlinePolicy, ObligationKind};
use facility_compliance::records;
use facility_compliance::Clock;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) policy: Arc<DeadlinePolicy>,
    pub(crate) clock: Arc<dyn Clock>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_calendar_date("date", raw).map_err(|err| format!("failed to parse '{raw}' ({err})"))
}

pub(crate) fn parse_kind(raw: &str) -> Result<ObligationKind, String> {
    records::parse_kind(raw).map_err(|err| {
        format!("{err} (expected verification, prescription or commission)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_cli_spellings() {
        assert_eq!(
            parse_kind("Verification"),
            Ok(ObligationKind::PeriodicVerification)
        );
        assert_eq!(parse_kind("commission"), Ok(ObligationKind::Commission));
        assert!(parse_kind("audit").is_err());
    }

    #[test]
    fn parse_date_reports_offending_input() {
        let error = parse_date("2025-02-30").expect_err("invalid calendar date");
        assert!(error.contains("2025-02-30"));
    }
}
