//! Individual regulatory checks.
//!
//! Each rule reads the shared [`RuleContext`] and reports every finding it
//! can see. Rules never consult one another.

mod clearinghouse;
mod credentials;
mod hours_of_service;
mod leasing;
mod twic;

pub use clearinghouse::ClearinghouseRule;
pub use credentials::CredentialExpiryRule;
pub use hours_of_service::HoursOfServiceRule;
pub use leasing::TruthInLeasingRule;
pub use twic::TwicRule;

use super::domain::{Driver, Route, Shipment};
use super::error::SnapshotError;
use super::outcome::RuleOutcome;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Inputs shared by every rule during a single evaluation.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub driver: &'a Driver,
    pub shipment: &'a Shipment,
    pub route: &'a Route,
    pub now: DateTime<Utc>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        driver: &'a Driver,
        shipment: &'a Shipment,
        route: &'a Route,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            driver,
            shipment,
            route,
            now,
        }
    }

    /// Calendar date of the evaluation instant.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// A credential stays valid through its expiry date.
    pub fn is_expired(&self, expiry: NaiveDate) -> bool {
        expiry < self.today()
    }
}

/// A single regulatory check over a driver/job snapshot.
///
/// `Ok` carries business findings (possibly none). `Err` means the snapshot
/// itself is malformed and must be fixed upstream.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Stable name used to tag violations in the combined result.
    fn name(&self) -> &str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, SnapshotError>;
}

pub(crate) fn checked_hours(field: &'static str, value: f64) -> Result<f64, SnapshotError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SnapshotError::InvalidHours { field, value })
    }
}
