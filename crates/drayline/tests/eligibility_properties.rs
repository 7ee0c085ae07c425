//! Property checks over randomly generated driver snapshots.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use drayline::clock::FixedClock;
use drayline::eligibility::rules::{Rule, RuleContext};
use drayline::eligibility::{
    ClearinghouseStatus, Driver, DriverId, EligibilityEngine, Route, RuleOutcome, RulePolicy,
    RuleRegistry, Shipment, ShipmentId,
};
use proptest::prelude::*;

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

fn date(offset_days: i64) -> NaiveDate {
    evaluation_time().date_naive() + Duration::days(offset_days)
}

fn status() -> impl Strategy<Value = Option<ClearinghouseStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(ClearinghouseStatus::Clear)),
        Just(Some(ClearinghouseStatus::Pending)),
        Just(Some(ClearinghouseStatus::Violation)),
    ]
}

prop_compose! {
    fn arb_clearinghouse()(
        status in status(),
        last_query_age in proptest::option::of(0i64..600),
        resolved in any::<bool>(),
    ) -> (Option<ClearinghouseStatus>, Option<NaiveDate>, bool) {
        (status, last_query_age.map(|age| date(-age)), resolved)
    }
}

prop_compose! {
    fn arb_twic()(
        number in proptest::option::of("[A-Z]{3}-[0-9]{6}"),
        expiry_offset in proptest::option::of(-60i64..900),
    ) -> (Option<String>, Option<NaiveDate>) {
        (number, expiry_offset.map(date))
    }
}

prop_compose! {
    fn arb_duty()(
        driving_tenths in 0u32..130,
        on_duty_tenths in 0u32..160,
        off_duty_minutes in proptest::option::of(0i64..1_440),
    ) -> (f64, f64, Option<DateTime<Utc>>) {
        (
            f64::from(driving_tenths) / 10.0,
            f64::from(on_duty_tenths) / 10.0,
            off_duty_minutes.map(|minutes| evaluation_time() - Duration::minutes(minutes)),
        )
    }
}

prop_compose! {
    fn arb_driver()(
        cdl_offset in -30i64..730,
        medical_offset in -30i64..730,
        clearinghouse in arb_clearinghouse(),
        twic in arb_twic(),
        duty in arb_duty(),
        lease_agreement_signed in any::<bool>(),
        lease_age in proptest::option::of(0i64..1_000),
    ) -> Driver {
        let (clearinghouse_status, clearinghouse_last_query, clearinghouse_resolved) = clearinghouse;
        let (twic_number, twic_expiry) = twic;
        let (hos_driving_hours_today, hos_on_duty_hours_today, last_off_duty) = duty;

        Driver {
            id: DriverId("DRV-PROP".to_string()),
            name: "Generated Driver".to_string(),
            cdl_number: "P0000000".to_string(),
            cdl_state: "NV".to_string(),
            cdl_expiry: date(cdl_offset),
            medical_card_expiry: date(medical_offset),
            clearinghouse_status,
            clearinghouse_last_query,
            clearinghouse_resolved,
            twic_number,
            twic_expiry,
            hos_driving_hours_today,
            hos_on_duty_hours_today,
            last_off_duty,
            lease_agreement_signed,
            lease_agreement_date: lease_age.map(|age| date(-age)),
        }
    }
}

fn shipment(requires_twic: bool) -> Shipment {
    Shipment {
        id: ShipmentId("SHP-PROP".to_string()),
        requires_twic,
        description: None,
    }
}

fn engine() -> EligibilityEngine {
    EligibilityEngine::with_clock(
        RuleRegistry::standard(&RulePolicy::default()),
        Arc::new(FixedClock::new(evaluation_time())),
    )
}

fn outcomes(
    engine: &EligibilityEngine,
    driver: &Driver,
    shipment: &Shipment,
    route: &Route,
) -> Vec<(String, RuleOutcome)> {
    let ctx = RuleContext::new(driver, shipment, route, evaluation_time());
    engine
        .registry()
        .iter()
        .map(|rule| {
            let outcome = rule.evaluate(&ctx).expect("generated snapshot is well formed");
            (rule.name().to_string(), outcome)
        })
        .collect()
}

proptest! {
    #[test]
    fn result_is_valid_exactly_when_every_rule_passes(
        driver in arb_driver(),
        requires_twic in any::<bool>(),
        route_tenths in 0u32..80,
    ) {
        let engine = engine();
        let shipment = shipment(requires_twic);
        let route = Route { estimated_drive_time_hours: f64::from(route_tenths) / 10.0 };

        let result = engine.evaluate(&driver, &shipment, &route).expect("well formed");
        let per_rule = outcomes(&engine, &driver, &shipment, &route);

        prop_assert_eq!(result.valid(), per_rule.iter().all(|(_, outcome)| outcome.valid()));

        let failing = per_rule.iter().filter(|(_, outcome)| !outcome.valid()).count();
        prop_assert!(result.violations().len() >= failing);

        let expected: Vec<(String, String)> = per_rule
            .iter()
            .flat_map(|(name, outcome)| {
                outcome
                    .violations()
                    .iter()
                    .map(move |violation| (name.clone(), violation.message.clone()))
            })
            .collect();
        let actual: Vec<(String, String)> = result
            .violations()
            .iter()
            .map(|violation| (violation.rule.clone(), violation.message.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn lease_inputs_only_affect_the_leasing_rule(
        driver in arb_driver(),
        requires_twic in any::<bool>(),
    ) {
        let engine = engine();
        let shipment = shipment(requires_twic);
        let route = Route { estimated_drive_time_hours: 1.5 };
        let mut flipped = driver.clone();
        flipped.lease_agreement_signed = !driver.lease_agreement_signed;
        flipped.lease_agreement_date = match driver.lease_agreement_date {
            Some(_) => None,
            None => Some(date(-30)),
        };

        let before = outcomes(&engine, &driver, &shipment, &route);
        let after = outcomes(&engine, &flipped, &shipment, &route);

        for ((name, left), (_, right)) in before.iter().zip(after.iter()) {
            if name != "truth_in_leasing" {
                prop_assert_eq!(left, right);
            }
        }
    }

    #[test]
    fn twic_flag_only_affects_the_twic_rule(driver in arb_driver()) {
        let engine = engine();
        let route = Route { estimated_drive_time_hours: 2.0 };

        let without = outcomes(&engine, &driver, &shipment(false), &route);
        let with = outcomes(&engine, &driver, &shipment(true), &route);

        for ((name, left), (_, right)) in without.iter().zip(with.iter()) {
            if name == "twic" {
                prop_assert!(left.valid());
            } else {
                prop_assert_eq!(left, right);
            }
        }
    }
}
