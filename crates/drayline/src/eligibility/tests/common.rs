use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::clock::FixedClock;
use crate::eligibility::domain::{
    ClearinghouseStatus, Driver, DriverId, Route, Shipment, ShipmentId,
};
use crate::eligibility::rules::RuleContext;
use crate::eligibility::{EligibilityEngine, RulePolicy, RuleRegistry};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap()
}

pub(super) fn today() -> NaiveDate {
    now().date_naive()
}

pub(super) fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

pub(super) fn days_ahead(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(super) fn hours_ago(hours: f64) -> DateTime<Utc> {
    now() - Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// Driver who passes every built-in rule at [`now`].
pub(super) fn compliant_driver() -> Driver {
    Driver {
        id: DriverId("DRV-1042".to_string()),
        name: "Luis Navarro".to_string(),
        cdl_number: "D4821937".to_string(),
        cdl_state: "CA".to_string(),
        cdl_expiry: NaiveDate::from_ymd_opt(2027, 5, 1).expect("valid date"),
        medical_card_expiry: NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date"),
        clearinghouse_status: Some(ClearinghouseStatus::Clear),
        clearinghouse_last_query: Some(NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")),
        clearinghouse_resolved: false,
        twic_number: Some("TWC-0048817".to_string()),
        twic_expiry: Some(NaiveDate::from_ymd_opt(2027, 8, 1).expect("valid date")),
        hos_driving_hours_today: 5.0,
        hos_on_duty_hours_today: 6.0,
        last_off_duty: Some(hours_ago(12.0)),
        lease_agreement_signed: true,
        lease_agreement_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")),
    }
}

/// Driver who fails every built-in rule for a TWIC job.
pub(super) fn noncompliant_driver() -> Driver {
    Driver {
        clearinghouse_status: Some(ClearinghouseStatus::Pending),
        twic_number: None,
        hos_driving_hours_today: 10.5,
        lease_agreement_signed: false,
        lease_agreement_date: None,
        cdl_expiry: days_ago(3),
        ..compliant_driver()
    }
}

pub(super) fn shipment(requires_twic: bool) -> Shipment {
    Shipment {
        id: ShipmentId("SHP-77810".to_string()),
        requires_twic,
        description: Some("40' container, Port of Long Beach to Ontario DC".to_string()),
    }
}

pub(super) fn route(hours: f64) -> Route {
    Route {
        estimated_drive_time_hours: hours,
    }
}

pub(super) fn context<'a>(
    driver: &'a Driver,
    shipment: &'a Shipment,
    route: &'a Route,
) -> RuleContext<'a> {
    RuleContext::new(driver, shipment, route, now())
}

pub(super) fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now()))
}

pub(super) fn engine() -> EligibilityEngine {
    engine_with(RuleRegistry::standard(&RulePolicy::default()))
}

pub(super) fn engine_with(registry: RuleRegistry) -> EligibilityEngine {
    EligibilityEngine::with_clock(registry, fixed_clock())
}
