use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DRIVING_HOURS: f64 = 11.0;
pub const DEFAULT_MAX_ON_DUTY_HOURS: f64 = 14.0;
pub const DEFAULT_MIN_OFF_DUTY_HOURS: f64 = 10.0;
pub const DEFAULT_CLEARINGHOUSE_QUERY_MAX_AGE_DAYS: i64 = 365;

/// Numeric thresholds behind the hours-of-service and Clearinghouse checks.
///
/// Defaults are the federal property-carrying limits from 49 CFR 395.3 and
/// the annual query requirement of 49 CFR 382.701.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulePolicy {
    pub max_driving_hours: f64,
    pub max_on_duty_hours: f64,
    pub min_off_duty_hours: f64,
    pub clearinghouse_query_max_age_days: i64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            max_driving_hours: DEFAULT_MAX_DRIVING_HOURS,
            max_on_duty_hours: DEFAULT_MAX_ON_DUTY_HOURS,
            min_off_duty_hours: DEFAULT_MIN_OFF_DUTY_HOURS,
            clearinghouse_query_max_age_days: DEFAULT_CLEARINGHOUSE_QUERY_MAX_AGE_DAYS,
        }
    }
}

impl RulePolicy {
    /// Replace unusable limits with the federal defaults.
    pub fn sanitized(self) -> Self {
        Self {
            max_driving_hours: sanitize_hours(
                "max_driving_hours",
                self.max_driving_hours,
                DEFAULT_MAX_DRIVING_HOURS,
            ),
            max_on_duty_hours: sanitize_hours(
                "max_on_duty_hours",
                self.max_on_duty_hours,
                DEFAULT_MAX_ON_DUTY_HOURS,
            ),
            min_off_duty_hours: sanitize_hours(
                "min_off_duty_hours",
                self.min_off_duty_hours,
                DEFAULT_MIN_OFF_DUTY_HOURS,
            ),
            clearinghouse_query_max_age_days: if self.clearinghouse_query_max_age_days > 0 {
                self.clearinghouse_query_max_age_days
            } else {
                tracing::warn!(
                    value = self.clearinghouse_query_max_age_days,
                    "clearinghouse query age limit must be positive, using default"
                );
                DEFAULT_CLEARINGHOUSE_QUERY_MAX_AGE_DAYS
            },
        }
    }
}

fn sanitize_hours(field: &'static str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(field, value, "hour limit must be positive and finite, using default");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_federal_limits() {
        let policy = RulePolicy::default();
        assert_eq!(policy.max_driving_hours, 11.0);
        assert_eq!(policy.max_on_duty_hours, 14.0);
        assert_eq!(policy.min_off_duty_hours, 10.0);
        assert_eq!(policy.clearinghouse_query_max_age_days, 365);
    }

    #[test]
    fn sanitized_replaces_unusable_limits() {
        let policy = RulePolicy {
            max_driving_hours: f64::NAN,
            max_on_duty_hours: -2.0,
            min_off_duty_hours: 8.0,
            clearinghouse_query_max_age_days: 0,
        }
        .sanitized();

        assert_eq!(policy.max_driving_hours, DEFAULT_MAX_DRIVING_HOURS);
        assert_eq!(policy.max_on_duty_hours, DEFAULT_MAX_ON_DUTY_HOURS);
        assert_eq!(policy.min_off_duty_hours, 8.0);
        assert_eq!(
            policy.clearinghouse_query_max_age_days,
            DEFAULT_CLEARINGHOUSE_QUERY_MAX_AGE_DAYS
        );
    }
}
