use super::{Rule, RuleContext};
use crate::eligibility::domain::ClearinghouseStatus;
use crate::eligibility::error::SnapshotError;
use crate::eligibility::outcome::{RuleOutcome, ViolationCode};
use crate::eligibility::policy::RulePolicy;

/// Drug and Alcohol Clearinghouse standing (49 CFR Part 382).
///
/// Status problems and query staleness are independent findings and are
/// reported together. Query age is counted in whole calendar days.
#[derive(Debug, Clone)]
pub struct ClearinghouseRule {
    max_query_age_days: i64,
}

impl ClearinghouseRule {
    pub const NAME: &'static str = "clearinghouse";

    pub fn new(policy: &RulePolicy) -> Self {
        Self {
            max_query_age_days: policy.sanitized().clearinghouse_query_max_age_days,
        }
    }
}

impl Default for ClearinghouseRule {
    fn default() -> Self {
        Self::new(&RulePolicy::default())
    }
}

impl Rule for ClearinghouseRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError> {
        let driver = ctx.driver;
        let mut outcome = RuleOutcome::pass();

        match driver.clearinghouse_status {
            None => outcome.push(
                ViolationCode::CLEARINGHOUSE_STATUS_MISSING,
                "Clearinghouse status required before assignment (49 CFR Part 382)",
            ),
            Some(ClearinghouseStatus::Pending) => outcome.push(
                ViolationCode::CLEARINGHOUSE_QUERY_PENDING,
                "Clearinghouse query must complete before assignment (49 CFR Part 382)",
            ),
            Some(ClearinghouseStatus::Violation) if !driver.clearinghouse_resolved => outcome
                .push(
                    ViolationCode::CLEARINGHOUSE_UNRESOLVED_VIOLATION,
                    "Unresolved Clearinghouse violation blocks assignment (49 CFR Part 382)",
                ),
            Some(ClearinghouseStatus::Violation) | Some(ClearinghouseStatus::Clear) => {}
        }

        if let Some(last_query) = driver.clearinghouse_last_query {
            let today = ctx.today();
            if last_query > today {
                return Err(SnapshotError::QueryInFuture { last_query, today });
            }

            let days = (today - last_query).num_days();
            if days > self.max_query_age_days {
                outcome.push(
                    ViolationCode::CLEARINGHOUSE_QUERY_OVERDUE,
                    format!(
                        "Annual Clearinghouse query overdue: last query {days} days ago (49 CFR 382.701)"
                    ),
                );
            }
        }

        Ok(outcome)
    }
}
