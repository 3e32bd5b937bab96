use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::catalog::OutcomeCatalog;
use crate::scoring::{
    ConstraintSet, Discretizer, DiscretizerConfig, OutcomeDirection, OutcomeRecord, OutcomeSet,
    ScoringEngine, ScoringRequest, ScoringService, StarMode, WeightingStrategy,
};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn harm(label: &str, effect_size: f64, importance: f64) -> OutcomeRecord {
    OutcomeRecord::new(label, OutcomeDirection::HarmType, effect_size, importance)
}

pub(super) fn benefit(label: &str, effect_size: f64, importance: f64) -> OutcomeRecord {
    OutcomeRecord::new(label, OutcomeDirection::BenefitType, effect_size, importance)
}

/// Stroke raised by 10 points at full importance, heart failure lowered by 10 at 29.
pub(super) fn stroke_and_heart_failure() -> Vec<OutcomeRecord> {
    vec![
        harm("Stroke", 0.10, 100.0),
        harm("HeartFailure", -0.10, 29.0),
    ]
}

pub(super) fn outcome_set(records: Vec<OutcomeRecord>) -> OutcomeSet {
    OutcomeSet::new(records).expect("valid outcome set")
}

pub(super) fn zero_importance_set() -> OutcomeSet {
    outcome_set(vec![
        harm("Stroke", -0.03, 0.0),
        harm("Major bleeding", 0.02, 0.0),
        benefit("Independent living", 0.02, 0.0),
    ])
}

pub(super) fn request(
    outcomes: Vec<OutcomeRecord>,
    weighting: WeightingStrategy,
) -> ScoringRequest {
    ScoringRequest {
        outcomes,
        weighting,
        constraints: ConstraintSet::default(),
    }
}

pub(super) fn engine(mode: StarMode) -> ScoringEngine {
    let discretizer =
        Discretizer::new(DiscretizerConfig::for_mode(mode)).expect("preset is valid");
    ScoringEngine::new(discretizer)
}

pub(super) fn service() -> Arc<ScoringService> {
    Arc::new(ScoringService::new(
        engine(StarMode::Five),
        OutcomeCatalog::standard(),
    ))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
