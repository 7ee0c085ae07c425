use crate::infra::{build_engine, parse_instant};
use crate::report::render_result;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use drayline::config::AppConfig;
use drayline::eligibility::{
    ClearinghouseStatus, Driver, DriverId, Route, Shipment, ShipmentId,
};
use drayline::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(Utc::now);
    let config = AppConfig::load()?;
    let engine = build_engine(&config.rules, Some(as_of));

    let shipment = sample_shipment();
    let route = sample_route();

    println!("=== Drayline dispatch compliance demo ===");
    if let Some(description) = &shipment.description {
        println!("Job {}: {description}", shipment.id);
    }
    println!(
        "Requires TWIC: {} | Estimated drive time: {:.1}h | As of: {}\n",
        if shipment.requires_twic { "yes" } else { "no" },
        route.estimated_drive_time_hours,
        as_of.to_rfc3339()
    );

    let mut eligible = 0;
    let drivers = sample_drivers(as_of);
    for driver in &drivers {
        let result = engine.evaluate(driver, &shipment, &route)?;
        if result.valid() {
            eligible += 1;
        }
        println!("{}", render_result(driver, &shipment, &result));
    }

    println!("{eligible} of {} sample driver(s) cleared for dispatch.", drivers.len());
    Ok(())
}

pub(crate) fn sample_shipment() -> Shipment {
    Shipment {
        id: ShipmentId("SHP-DEMO-01".to_string()),
        requires_twic: true,
        description: Some("40' container pickup, Port of Oakland to Tracy DC".to_string()),
    }
}

pub(crate) fn sample_route() -> Route {
    Route {
        estimated_drive_time_hours: 3.5,
    }
}

/// Sample roster dated relative to `as_of`, so the demo reads the same on
/// any day. Only the first driver is cleared for the sample job.
pub(crate) fn sample_drivers(as_of: DateTime<Utc>) -> Vec<Driver> {
    let today = as_of.date_naive();
    let days_ago = |days: i64| today - Duration::days(days);
    let days_ahead = |days: i64| today + Duration::days(days);

    let cleared = Driver {
        id: DriverId("DRV-2001".to_string()),
        name: "Ana Torres".to_string(),
        cdl_number: "C1093384".to_string(),
        cdl_state: "CA".to_string(),
        cdl_expiry: days_ahead(700),
        medical_card_expiry: days_ahead(240),
        clearinghouse_status: Some(ClearinghouseStatus::Clear),
        clearinghouse_last_query: Some(days_ago(45)),
        clearinghouse_resolved: false,
        twic_number: Some("TWC-5520193".to_string()),
        twic_expiry: Some(days_ahead(900)),
        hos_driving_hours_today: 4.0,
        hos_on_duty_hours_today: 5.0,
        last_off_duty: Some(as_of - Duration::hours(14)),
        lease_agreement_signed: true,
        lease_agreement_date: Some(days_ago(300)),
    };

    vec![
        cleared.clone(),
        Driver {
            id: DriverId("DRV-2002".to_string()),
            name: "Ben Okafor".to_string(),
            lease_agreement_signed: false,
            lease_agreement_date: None,
            ..cleared.clone()
        },
        Driver {
            id: DriverId("DRV-2003".to_string()),
            name: "Chen Wu".to_string(),
            twic_number: None,
            twic_expiry: None,
            ..cleared.clone()
        },
        Driver {
            id: DriverId("DRV-2004".to_string()),
            name: "Dana Reyes".to_string(),
            hos_driving_hours_today: 9.5,
            hos_on_duty_hours_today: 11.0,
            last_off_duty: Some(as_of - Duration::hours(6)),
            ..cleared.clone()
        },
        Driver {
            id: DriverId("DRV-2005".to_string()),
            name: "Eli Brooks".to_string(),
            medical_card_expiry: days_ago(12),
            clearinghouse_last_query: Some(days_ago(400)),
            ..cleared
        },
    ]
}
