use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::ScoringService;
use super::{ComparisonRequest, ConstraintSet, ScoringError, ScoringRequest, WeightingStrategy};
use crate::catalog::OutcomeOverride;

/// Body for scoring the catalog defaults with user edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsScoringRequest {
    #[serde(default)]
    pub overrides: Vec<OutcomeOverride>,
    pub weighting: WeightingStrategy,
    #[serde(default)]
    pub constraints: ConstraintSet,
}

/// Router builder exposing the scoring endpoints.
pub fn scoring_router(service: Arc<ScoringService>) -> Router {
    Router::new()
        .route("/api/v1/scoring/evaluate", post(evaluate_handler))
        .route("/api/v1/scoring/compare", post(compare_handler))
        .route("/api/v1/outcomes/defaults", get(defaults_handler))
        .route(
            "/api/v1/outcomes/defaults/score",
            post(score_defaults_handler),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<ScoringService>>,
    payload: Result<axum::Json<ScoringRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.evaluate(&request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler(
    State(service): State<Arc<ScoringService>>,
    payload: Result<axum::Json<ComparisonRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.compare(&request) {
        Ok(comparison) => (StatusCode::OK, axum::Json(comparison)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn defaults_handler(State(service): State<Arc<ScoringService>>) -> Response {
    let payload = json!({
        "outcomes": service.defaults(),
        "max_outcomes": service.engine().limits().max_outcomes,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn score_defaults_handler(
    State(service): State<Arc<ScoringService>>,
    payload: Result<axum::Json<DefaultsScoringRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.evaluate_defaults(&request.overrides, request.weighting, &request.constraints) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Bodies that fail to deserialize get the same payload shape as scoring errors.
fn rejection_response(rejection: JsonRejection) -> Response {
    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "invalid_outcome",
        _ => "malformed_request",
    };
    let payload = json!({
        "error": rejection.body_text(),
        "kind": kind,
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(error: ScoringError) -> Response {
    let status = if error.is_user_correctable() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (status, axum::Json(payload)).into_response()
}
