use chrono::{DateTime, NaiveDate, Utc};

/// Malformed snapshot data detected while a rule inspected its inputs.
///
/// These are upstream data-integrity defects, never compliance findings, so
/// they are reported as errors rather than violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("{field} must be a finite, non-negative number of hours (found {value})")]
    InvalidHours { field: &'static str, value: f64 },
    #[error("last off-duty period {last_off_duty} is after the evaluation time {now}")]
    OffDutyInFuture {
        last_off_duty: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    #[error("clearinghouse query date {last_query} is after the evaluation date {today}")]
    QueryInFuture {
        last_query: NaiveDate,
        today: NaiveDate,
    },
}

/// Failure of an evaluation as a whole.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("rule '{rule}' rejected the snapshot: {source}")]
    Snapshot {
        rule: String,
        #[source]
        source: SnapshotError,
    },
}

impl EligibilityError {
    pub fn rule(&self) -> &str {
        match self {
            EligibilityError::Snapshot { rule, .. } => rule,
        }
    }
}

/// Errors raised while assembling a rule registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a rule named '{0}' is already registered")]
    DuplicateRule(String),
}
