use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for drivers on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverId(pub String);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for transport jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(pub String);

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of the most recent FMCSA Drug and Alcohol Clearinghouse query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearinghouseStatus {
    Clear,
    Pending,
    Violation,
}

impl ClearinghouseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ClearinghouseStatus::Clear => "clear",
            ClearinghouseStatus::Pending => "pending",
            ClearinghouseStatus::Violation => "violation",
        }
    }
}

/// Compliance snapshot of a driver at the time of evaluation.
///
/// Hours are decimal hours for the current duty cycle. Dates and instants are
/// expected in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub cdl_number: String,
    pub cdl_state: String,
    pub cdl_expiry: NaiveDate,
    pub medical_card_expiry: NaiveDate,
    #[serde(default)]
    pub clearinghouse_status: Option<ClearinghouseStatus>,
    #[serde(default)]
    pub clearinghouse_last_query: Option<NaiveDate>,
    /// Only meaningful when the status is [`ClearinghouseStatus::Violation`].
    #[serde(default)]
    pub clearinghouse_resolved: bool,
    #[serde(default)]
    pub twic_number: Option<String>,
    #[serde(default)]
    pub twic_expiry: Option<NaiveDate>,
    pub hos_driving_hours_today: f64,
    pub hos_on_duty_hours_today: f64,
    #[serde(default)]
    pub last_off_duty: Option<DateTime<Utc>>,
    pub lease_agreement_signed: bool,
    #[serde(default)]
    pub lease_agreement_date: Option<NaiveDate>,
}

impl Driver {
    /// Whether a non-blank TWIC card number is on file.
    pub fn has_twic(&self) -> bool {
        self.twic_number
            .as_deref()
            .map(|number| !number.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Job snapshot. Only `requires_twic` takes part in eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub requires_twic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Route estimate for the candidate assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Driving time the assignment would add, in decimal hours.
    pub estimated_drive_time_hours: f64,
}
