use serde::Serialize;
use std::fmt;

/// Stable machine-readable identifier for a compliance finding.
///
/// Codes are plain strings so a new rule can declare its own without touching
/// the built-in set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViolationCode(&'static str);

impl ViolationCode {
    pub const CLEARINGHOUSE_STATUS_MISSING: Self = Self("CLEARINGHOUSE_STATUS_MISSING");
    pub const CLEARINGHOUSE_QUERY_PENDING: Self = Self("CLEARINGHOUSE_QUERY_PENDING");
    pub const CLEARINGHOUSE_UNRESOLVED_VIOLATION: Self =
        Self("CLEARINGHOUSE_UNRESOLVED_VIOLATION");
    pub const CLEARINGHOUSE_QUERY_OVERDUE: Self = Self("CLEARINGHOUSE_QUERY_OVERDUE");
    pub const HOS_DRIVING_LIMIT: Self = Self("HOS_DRIVING_LIMIT");
    pub const HOS_ON_DUTY_LIMIT: Self = Self("HOS_ON_DUTY_LIMIT");
    pub const HOS_OFF_DUTY_REQUIRED: Self = Self("HOS_OFF_DUTY_REQUIRED");
    pub const LEASE_NOT_SIGNED: Self = Self("LEASE_NOT_SIGNED");
    pub const LEASE_DATE_MISSING: Self = Self("LEASE_DATE_MISSING");
    pub const TWIC_MISSING: Self = Self("TWIC_MISSING");
    pub const TWIC_EXPIRED: Self = Self("TWIC_EXPIRED");
    pub const CDL_EXPIRED: Self = Self("CDL_EXPIRED");
    pub const MEDICAL_CARD_EXPIRED: Self = Self("MEDICAL_CARD_EXPIRED");

    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single blocking finding raised by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    pub code: ViolationCode,
    pub message: String,
}

/// Everything one rule found for one driver/job pair.
///
/// `valid` is kept in lockstep with the violation list: it is true exactly
/// when no violation was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    valid: bool,
    violations: Vec<RuleViolation>,
}

impl Default for RuleOutcome {
    fn default() -> Self {
        Self::pass()
    }
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    pub fn from_violations(violations: Vec<RuleViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Record another violation, builder style.
    pub fn with(mut self, code: ViolationCode, message: impl Into<String>) -> Self {
        self.push(code, message);
        self
    }

    pub fn push(&mut self, code: ViolationCode, message: impl Into<String>) {
        self.violations.push(RuleViolation {
            code,
            message: message.into(),
        });
        self.valid = false;
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    pub fn has_code(&self, code: ViolationCode) -> bool {
        self.violations.iter().any(|violation| violation.code == code)
    }

    pub fn into_violations(self) -> Vec<RuleViolation> {
        self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_the_violation_list() {
        let outcome = RuleOutcome::pass();
        assert!(outcome.valid());
        assert!(outcome.violations().is_empty());

        let outcome = outcome.with(ViolationCode::CDL_EXPIRED, "CDL license has expired");
        assert!(!outcome.valid());
        assert!(outcome.has_code(ViolationCode::CDL_EXPIRED));
        assert!(!outcome.has_code(ViolationCode::TWIC_EXPIRED));

        assert!(RuleOutcome::from_violations(Vec::new()).valid());
    }

    #[test]
    fn codes_serialize_as_bare_strings() {
        let outcome = RuleOutcome::default().with(ViolationCode::TWIC_MISSING, "no card");
        let json = serde_json::to_value(&outcome).expect("outcome serializes");
        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["code"], "TWIC_MISSING");
        assert_eq!(json["violations"][0]["message"], "no card");
    }

    #[test]
    fn custom_codes_render_their_identifier() {
        const HAZMAT: ViolationCode = ViolationCode::new("HAZMAT_ENDORSEMENT_MISSING");
        assert_eq!(HAZMAT.to_string(), "HAZMAT_ENDORSEMENT_MISSING");
        assert_eq!(HAZMAT.as_str(), "HAZMAT_ENDORSEMENT_MISSING");
    }
}
