//! Driver roster import and roster-wide readiness listings.
//!
//! A roster is a CSV export with one driver per row and the snake_case
//! [`Driver`] field names as headers. Blank cells mean "not on file".

use crate::eligibility::{
    ClearinghouseStatus, Driver, DriverId, EligibilityEngine, EligibilityResult, Route, Shipment,
    ShipmentId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// Reads driver compliance snapshots from a roster CSV export.
pub struct DriverRosterImporter;

impl DriverRosterImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Driver>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Driver>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut drivers = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: RosterRow = record.deserialize(Some(&headers))?;
            drivers.push(row.into_driver(line)?);
        }

        info!(drivers = drivers.len(), "driver roster imported");
        Ok(drivers)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    cdl_number: String,
    cdl_state: String,
    cdl_expiry: String,
    medical_card_expiry: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    clearinghouse_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    clearinghouse_last_query: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    clearinghouse_resolved: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    twic_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    twic_expiry: Option<String>,
    hos_driving_hours_today: String,
    hos_on_duty_hours_today: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_off_duty: Option<String>,
    lease_agreement_signed: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lease_agreement_date: Option<String>,
}

impl RosterRow {
    fn into_driver(self, line: u64) -> Result<Driver, RosterImportError> {
        let invalid = |field: &'static str, value: &str| RosterImportError::InvalidField {
            line,
            field,
            value: value.to_string(),
        };
        let date = |field: &'static str, value: &str| {
            parse_date(value).ok_or_else(|| invalid(field, value))
        };
        let hours = |field: &'static str, value: &str| {
            value.parse::<f64>().map_err(|_| invalid(field, value))
        };
        let flag = |field: &'static str, value: &str| {
            parse_flag(value).ok_or_else(|| invalid(field, value))
        };

        let clearinghouse_status = self
            .clearinghouse_status
            .as_deref()
            .map(|value| {
                parse_clearinghouse_status(value).ok_or_else(|| invalid("clearinghouse_status", value))
            })
            .transpose()?;
        let clearinghouse_last_query = self
            .clearinghouse_last_query
            .as_deref()
            .map(|value| date("clearinghouse_last_query", value))
            .transpose()?;
        let clearinghouse_resolved = self
            .clearinghouse_resolved
            .as_deref()
            .map(|value| flag("clearinghouse_resolved", value))
            .transpose()?
            .unwrap_or(false);
        let twic_expiry = self
            .twic_expiry
            .as_deref()
            .map(|value| date("twic_expiry", value))
            .transpose()?;
        let last_off_duty = self
            .last_off_duty
            .as_deref()
            .map(|value| parse_instant(value).ok_or_else(|| invalid("last_off_duty", value)))
            .transpose()?;
        let lease_agreement_date = self
            .lease_agreement_date
            .as_deref()
            .map(|value| date("lease_agreement_date", value))
            .transpose()?;

        Ok(Driver {
            cdl_expiry: date("cdl_expiry", &self.cdl_expiry)?,
            medical_card_expiry: date("medical_card_expiry", &self.medical_card_expiry)?,
            hos_driving_hours_today: hours(
                "hos_driving_hours_today",
                &self.hos_driving_hours_today,
            )?,
            hos_on_duty_hours_today: hours(
                "hos_on_duty_hours_today",
                &self.hos_on_duty_hours_today,
            )?,
            lease_agreement_signed: flag("lease_agreement_signed", &self.lease_agreement_signed)?,
            id: DriverId(self.id),
            name: self.name,
            cdl_number: self.cdl_number,
            cdl_state: self.cdl_state,
            clearinghouse_status,
            clearinghouse_last_query,
            clearinghouse_resolved,
            twic_number: self.twic_number,
            twic_expiry,
            last_off_duty,
            lease_agreement_date,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_clearinghouse_status(value: &str) -> Option<ClearinghouseStatus> {
    match value.trim().to_ascii_lowercase().as_str() {
        "clear" => Some(ClearinghouseStatus::Clear),
        "pending" => Some(ClearinghouseStatus::Pending),
        "violation" => Some(ClearinghouseStatus::Violation),
        _ => None,
    }
}

/// Eligibility of every roster driver for one job. A listing, not an
/// assignment: no driver is ranked or selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterReport {
    pub shipment_id: ShipmentId,
    pub evaluated: usize,
    pub eligible: usize,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub driver_id: DriverId,
    pub driver_name: String,
    #[serde(flatten)]
    pub outcome: RosterOutcome,
}

/// A roster row either evaluates or is rejected as malformed; a bad row does
/// not hide the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterOutcome {
    Evaluated { result: EligibilityResult },
    Rejected { rule: String, error: String },
}

impl RosterOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, RosterOutcome::Evaluated { result } if result.valid())
    }
}

pub fn evaluate_roster(
    engine: &EligibilityEngine,
    drivers: &[Driver],
    shipment: &Shipment,
    route: &Route,
) -> RosterReport {
    let entries: Vec<RosterEntry> = drivers
        .iter()
        .map(|driver| {
            let outcome = match engine.evaluate(driver, shipment, route) {
                Ok(result) => RosterOutcome::Evaluated { result },
                Err(error) => RosterOutcome::Rejected {
                    rule: error.rule().to_string(),
                    error: error.to_string(),
                },
            };
            RosterEntry {
                driver_id: driver.id.clone(),
                driver_name: driver.name.clone(),
                outcome,
            }
        })
        .collect();

    let eligible = entries
        .iter()
        .filter(|entry| entry.outcome.is_eligible())
        .count();

    info!(
        shipment_id = %shipment.id,
        evaluated = entries.len(),
        eligible,
        "roster evaluated"
    );

    RosterReport {
        shipment_id: shipment.id.clone(),
        evaluated: entries.len(),
        eligible,
        entries,
    }
}
