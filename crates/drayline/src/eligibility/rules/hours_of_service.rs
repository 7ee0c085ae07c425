use super::{checked_hours, Rule, RuleContext};
use crate::eligibility::error::SnapshotError;
use crate::eligibility::outcome::{RuleOutcome, ViolationCode};
use crate::eligibility::policy::RulePolicy;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours-of-service limits (49 CFR Part 395).
///
/// Limits are exceeded only when strictly passed: a total of exactly 11.0
/// driving hours is still allowed.
#[derive(Debug, Clone)]
pub struct HoursOfServiceRule {
    max_driving_hours: f64,
    max_on_duty_hours: f64,
    min_off_duty_hours: f64,
}

impl HoursOfServiceRule {
    pub const NAME: &'static str = "hours_of_service";

    pub fn new(policy: &RulePolicy) -> Self {
        let policy = policy.sanitized();
        Self {
            max_driving_hours: policy.max_driving_hours,
            max_on_duty_hours: policy.max_on_duty_hours,
            min_off_duty_hours: policy.min_off_duty_hours,
        }
    }
}

impl Default for HoursOfServiceRule {
    fn default() -> Self {
        Self::new(&RulePolicy::default())
    }
}

impl Rule for HoursOfServiceRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError> {
        let driving = checked_hours("hos_driving_hours_today", ctx.driver.hos_driving_hours_today)?;
        let on_duty = checked_hours("hos_on_duty_hours_today", ctx.driver.hos_on_duty_hours_today)?;
        let added = checked_hours(
            "estimated_drive_time_hours",
            ctx.route.estimated_drive_time_hours,
        )?;

        let mut outcome = RuleOutcome::pass();

        let driving_total = driving + added;
        if driving_total > self.max_driving_hours {
            outcome.push(
                ViolationCode::HOS_DRIVING_LIMIT,
                format!(
                    "Assignment would exceed the {}-hour driving limit ({:.2} hours) (49 CFR 395.3)",
                    self.max_driving_hours, driving_total
                ),
            );
        }

        let on_duty_total = on_duty + added;
        if on_duty_total > self.max_on_duty_hours {
            outcome.push(
                ViolationCode::HOS_ON_DUTY_LIMIT,
                format!(
                    "Assignment would exceed the {}-hour on-duty window ({:.2} hours) (49 CFR 395.3)",
                    self.max_on_duty_hours, on_duty_total
                ),
            );
        }

        if let Some(last_off_duty) = ctx.driver.last_off_duty {
            if last_off_duty > ctx.now {
                return Err(SnapshotError::OffDutyInFuture {
                    last_off_duty,
                    now: ctx.now,
                });
            }

            let hours_since =
                (ctx.now - last_off_duty).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            if hours_since < self.min_off_duty_hours {
                // a blocked driver never owes "0.0" hours
                let remaining = round_tenths(self.min_off_duty_hours - hours_since).max(0.1);
                outcome.push(
                    ViolationCode::HOS_OFF_DUTY_REQUIRED,
                    format!(
                        "Driver must complete {remaining:.1} more hours of off-duty time (49 CFR 395.3)"
                    ),
                );
            }
        }

        Ok(outcome)
    }
}

fn round_tenths(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}
