use super::{Rule, RuleContext};
use crate::eligibility::error::SnapshotError;
use crate::eligibility::outcome::{RuleOutcome, ViolationCode};

/// Port-terminal access credential. Only applies to jobs flagged as
/// requiring a TWIC.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwicRule;

impl TwicRule {
    pub const NAME: &'static str = "twic";
}

impl Rule for TwicRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError> {
        if !ctx.shipment.requires_twic {
            return Ok(RuleOutcome::pass());
        }

        let mut outcome = RuleOutcome::pass();

        if !ctx.driver.has_twic() {
            outcome.push(
                ViolationCode::TWIC_MISSING,
                "Valid TWIC required for port access (49 CFR 1572)",
            );
        }

        if let Some(expiry) = ctx.driver.twic_expiry {
            if ctx.is_expired(expiry) {
                outcome.push(
                    ViolationCode::TWIC_EXPIRED,
                    format!("TWIC credential has expired (expired {expiry}) (49 CFR 1572)"),
                );
            }
        }

        Ok(outcome)
    }
}
