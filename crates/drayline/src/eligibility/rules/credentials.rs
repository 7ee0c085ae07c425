use super::{Rule, RuleContext};
use crate::eligibility::error::SnapshotError;
use crate::eligibility::outcome::{RuleOutcome, ViolationCode};

/// Commercial driver's license and DOT medical certificate validity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialExpiryRule;

impl CredentialExpiryRule {
    pub const NAME: &'static str = "cdl_medical";
}

impl Rule for CredentialExpiryRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError> {
        let driver = ctx.driver;
        let mut outcome = RuleOutcome::pass();

        if ctx.is_expired(driver.cdl_expiry) {
            outcome.push(
                ViolationCode::CDL_EXPIRED,
                format!(
                    "CDL license has expired (expired {}) (49 CFR Part 383)",
                    driver.cdl_expiry
                ),
            );
        }

        if ctx.is_expired(driver.medical_card_expiry) {
            outcome.push(
                ViolationCode::MEDICAL_CARD_EXPIRED,
                format!(
                    "DOT medical card has expired (expired {}) (49 CFR 391.45)",
                    driver.medical_card_expiry
                ),
            );
        }

        Ok(outcome)
    }
}
