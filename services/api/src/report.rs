use crate::infra::{build_engine, parse_instant};
use chrono::{DateTime, Utc};
use clap::Args;
use drayline::config::AppConfig;
use drayline::eligibility::router::EvaluateRequest;
use drayline::eligibility::{Driver, EligibilityResult, Route, Shipment, ShipmentId};
use drayline::error::AppError;
use drayline::roster::{evaluate_roster, DriverRosterImporter, RosterOutcome, RosterReport};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding `driver`, `shipment`, and `route` snapshots
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Print the raw JSON result instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Roster CSV export with one driver per row
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Identifier of the job being staffed
    #[arg(long, default_value = "adhoc")]
    pub(crate) shipment_id: String,
    /// The job needs unescorted port-terminal access
    #[arg(long)]
    pub(crate) requires_twic: bool,
    /// Estimated driving time the job adds, in hours
    #[arg(long)]
    pub(crate) drive_hours: f64,
    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Print the raw JSON report instead of the text listing
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        as_of,
        json,
    } = args;

    let config = AppConfig::load()?;
    let reader = BufReader::new(File::open(input)?);
    let request: EvaluateRequest = serde_json::from_reader(reader)?;

    let engine = build_engine(&config.rules, as_of);
    let result = engine.evaluate(&request.driver, &request.shipment, &request.route)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&request.driver, &request.shipment, &result));
    }

    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let RosterArgs {
        roster,
        shipment_id,
        requires_twic,
        drive_hours,
        as_of,
        json,
    } = args;

    let config = AppConfig::load()?;
    let drivers = DriverRosterImporter::from_path(roster)?;
    let shipment = Shipment {
        id: ShipmentId(shipment_id),
        requires_twic,
        description: None,
    };
    let route = Route {
        estimated_drive_time_hours: drive_hours,
    };

    let engine = build_engine(&config.rules, as_of);
    let report = evaluate_roster(&engine, &drivers, &shipment, &route);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_roster(&report));
    }

    Ok(())
}

pub(crate) fn render_result(
    driver: &Driver,
    shipment: &Shipment,
    result: &EligibilityResult,
) -> String {
    let mut out = format!(
        "Driver {} ({}) for shipment {}: {}\n",
        driver.id,
        driver.name,
        shipment.id,
        result.summary()
    );
    out.push_str(&format!(
        "  evaluated at {}\n",
        result.evaluated_at().to_rfc3339()
    ));

    for verdict in result.rules() {
        let marker = if verdict.valid { "ok" } else { "BLOCKED" };
        out.push_str(&format!("  [{marker}] {}\n", verdict.rule));
        for violation in result.violations_for(&verdict.rule) {
            out.push_str(&format!("      - {}: {}\n", violation.code, violation.message));
        }
    }

    out
}

pub(crate) fn render_roster(report: &RosterReport) -> String {
    let mut out = format!(
        "Roster readiness for shipment {}: {} of {} driver(s) eligible\n",
        report.shipment_id, report.eligible, report.evaluated
    );

    for entry in &report.entries {
        match &entry.outcome {
            RosterOutcome::Evaluated { result } => {
                out.push_str(&format!(
                    "- {} ({}): {}\n",
                    entry.driver_id,
                    entry.driver_name,
                    result.summary()
                ));
                for violation in result.violations() {
                    out.push_str(&format!(
                        "    [{}] {}: {}\n",
                        violation.rule, violation.code, violation.message
                    ));
                }
            }
            RosterOutcome::Rejected { rule, error } => {
                out.push_str(&format!(
                    "- {} ({}): record rejected by {rule}: {error}\n",
                    entry.driver_id, entry.driver_name
                ));
            }
        }
    }

    out
}
