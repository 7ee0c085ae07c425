use super::{Rule, RuleContext};
use crate::eligibility::error::SnapshotError;
use crate::eligibility::outcome::{RuleOutcome, ViolationCode};

/// Written lease requirement for owner-operators (49 CFR Part 376).
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthInLeasingRule;

impl TruthInLeasingRule {
    pub const NAME: &'static str = "truth_in_leasing";
}

impl Rule for TruthInLeasingRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError> {
        let driver = ctx.driver;
        let outcome = if !driver.lease_agreement_signed {
            RuleOutcome::pass().with(
                ViolationCode::LEASE_NOT_SIGNED,
                "Lease agreement must be signed before first dispatch (49 CFR Part 376)",
            )
        } else if driver.lease_agreement_date.is_none() {
            // signed but undated is still a compliance gap
            RuleOutcome::pass().with(
                ViolationCode::LEASE_DATE_MISSING,
                "Lease agreement date required for compliance tracking (49 CFR Part 376)",
            )
        } else {
            RuleOutcome::pass()
        };

        Ok(outcome)
    }
}
