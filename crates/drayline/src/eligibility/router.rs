use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Driver, Route, Shipment};
use super::{EligibilityEngine, EligibilityError};
use crate::roster::{evaluate_roster, DriverRosterImporter};

/// Body of a single driver/job eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub driver: Driver,
    pub shipment: Shipment,
    pub route: Route,
}

/// Body of a roster readiness check: every driver in the CSV against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRequest {
    pub roster_csv: String,
    pub shipment: Shipment,
    pub route: Route,
}

/// Router builder exposing the eligibility endpoints.
pub fn eligibility_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler))
        .route("/api/v1/eligibility/roster", post(roster_handler))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response {
    match engine.evaluate(&request.driver, &request.shipment, &request.route) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => snapshot_rejected(error),
    }
}

pub(crate) async fn roster_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(request): axum::Json<RosterRequest>,
) -> Response {
    let RosterRequest {
        roster_csv,
        shipment,
        route,
    } = request;

    let drivers = match DriverRosterImporter::from_reader(Cursor::new(roster_csv.into_bytes())) {
        Ok(drivers) => drivers,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let report = evaluate_roster(&engine, &drivers, &shipment, &route);
    (StatusCode::OK, axum::Json(report)).into_response()
}

fn snapshot_rejected(error: EligibilityError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "rule": error.rule(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
