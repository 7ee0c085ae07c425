use chrono::{DateTime, NaiveDate, Utc};
use drayline::clock::{Clock, FixedClock, SystemClock};
use drayline::eligibility::{EligibilityEngine, RulePolicy, RuleRegistry};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Standard engine, pinned to `as_of` when given.
pub(crate) fn build_engine(policy: &RulePolicy, as_of: Option<DateTime<Utc>>) -> EligibilityEngine {
    let clock: Arc<dyn Clock> = match as_of {
        Some(instant) => Arc::new(FixedClock::new(instant)),
        None => Arc::new(SystemClock),
    };
    EligibilityEngine::with_clock(RuleRegistry::standard(policy), clock)
}

/// Accepts RFC 3339 instants or plain dates (midnight UTC).
pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}
