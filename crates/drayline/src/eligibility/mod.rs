//! Driver-job eligibility: independent regulatory rules, combined into one
//! explainable verdict.

pub mod domain;
mod error;
mod outcome;
mod policy;
mod registry;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use domain::{ClearinghouseStatus, Driver, DriverId, Route, Shipment, ShipmentId};
pub use error::{EligibilityError, RegistryError, SnapshotError};
pub use outcome::{RuleOutcome, RuleViolation, ViolationCode};
pub use policy::RulePolicy;
pub use registry::RuleRegistry;
pub use router::eligibility_router;
pub use rules::{Rule, RuleContext};

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs every registered rule against the same snapshot and instant.
///
/// The engine holds no per-call state, so one instance can serve any number
/// of concurrent evaluations.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    registry: RuleRegistry,
    clock: Arc<dyn Clock>,
}

impl EligibilityEngine {
    pub fn new(registry: RuleRegistry) -> Self {
        Self::with_clock(registry, Arc::new(SystemClock))
    }

    pub fn with_clock(registry: RuleRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Engine with the built-in federal rule set.
    pub fn standard(policy: RulePolicy) -> Self {
        Self::new(RuleRegistry::standard(&policy))
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate a driver for a job.
    ///
    /// Every rule runs even after earlier rules report violations. A malformed
    /// snapshot surfaces as an [`EligibilityError`] naming the rule that
    /// rejected it.
    pub fn evaluate(
        &self,
        driver: &Driver,
        shipment: &Shipment,
        route: &Route,
    ) -> Result<EligibilityResult, EligibilityError> {
        let now = self.clock.now();
        let ctx = RuleContext::new(driver, shipment, route, now);

        let outcomes = match self.run_rules(&ctx) {
            Ok(outcomes) => outcomes,
            Err(err) => {
                warn!(
                    driver_id = %driver.id,
                    shipment_id = %shipment.id,
                    rule = err.rule(),
                    error = %err,
                    "eligibility snapshot rejected"
                );
                return Err(err);
            }
        };

        let result = EligibilityResult::from_outcomes(outcomes, now);
        debug!(
            driver_id = %driver.id,
            shipment_id = %shipment.id,
            valid = result.valid(),
            violations = result.violations().len(),
            "eligibility evaluated"
        );

        Ok(result)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rules(
        &self,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<(String, RuleOutcome)>, EligibilityError> {
        self.registry
            .rules()
            .iter()
            .map(|rule| run_rule(rule.as_ref(), ctx))
            .collect()
    }

    // Rayon keeps collected items in source order, so results still follow
    // registration order.
    #[cfg(feature = "parallel")]
    fn run_rules(
        &self,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<(String, RuleOutcome)>, EligibilityError> {
        use rayon::prelude::*;

        self.registry
            .rules()
            .par_iter()
            .map(|rule| run_rule(rule.as_ref(), ctx))
            .collect()
    }
}

fn run_rule(
    rule: &dyn Rule,
    ctx: &RuleContext<'_>,
) -> Result<(String, RuleOutcome), EligibilityError> {
    match rule.evaluate(ctx) {
        Ok(outcome) => Ok((rule.name().to_string(), outcome)),
        Err(source) => Err(EligibilityError::Snapshot {
            rule: rule.name().to_string(),
            source,
        }),
    }
}

/// One blocking finding, tagged with the rule that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityViolation {
    pub rule: String,
    pub code: ViolationCode,
    pub message: String,
}

/// Per-rule pass/fail line for operator displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    pub rule: String,
    pub valid: bool,
    pub violation_count: usize,
}

/// Combined verdict for a driver/job pair.
///
/// Violations keep rule registration order and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    valid: bool,
    violations: Vec<EligibilityViolation>,
    rules: Vec<RuleVerdict>,
    evaluated_at: DateTime<Utc>,
}

impl EligibilityResult {
    fn from_outcomes(outcomes: Vec<(String, RuleOutcome)>, evaluated_at: DateTime<Utc>) -> Self {
        let mut violations = Vec::new();
        let mut rules = Vec::with_capacity(outcomes.len());

        for (rule, outcome) in outcomes {
            rules.push(RuleVerdict {
                rule: rule.clone(),
                valid: outcome.valid(),
                violation_count: outcome.violations().len(),
            });
            violations.extend(outcome.into_violations().into_iter().map(|violation| {
                EligibilityViolation {
                    rule: rule.clone(),
                    code: violation.code,
                    message: violation.message,
                }
            }));
        }

        Self {
            valid: violations.is_empty(),
            violations,
            rules,
            evaluated_at,
        }
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn violations(&self) -> &[EligibilityViolation] {
        &self.violations
    }

    pub fn rules(&self) -> &[RuleVerdict] {
        &self.rules
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    pub fn violations_for<'a>(
        &'a self,
        rule: &'a str,
    ) -> impl Iterator<Item = &'a EligibilityViolation> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.rule == rule)
    }

    pub fn has_code(&self, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.code == code)
    }

    pub fn failed_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|verdict| !verdict.valid)
            .map(|verdict| verdict.rule.as_str())
    }

    pub fn summary(&self) -> String {
        if self.valid {
            return "eligible".to_string();
        }

        format!(
            "ineligible: {} violation(s) across {} rule(s)",
            self.violations.len(),
            self.failed_rules().count()
        )
    }
}
