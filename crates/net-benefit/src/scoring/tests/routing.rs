use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::scoring::router::{evaluate_handler, scoring_router};
use crate::scoring::WeightingStrategy;

fn post_json(uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn evaluate_handler_scores_requests() {
    let response = evaluate_handler(
        State(service()),
        Ok(axum::Json(request(
            stroke_and_heart_failure(),
            WeightingStrategy::FixedScale,
        ))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["per_1000"], 71);
    assert_eq!(body["category"], "NET_HARMFUL");
}

#[tokio::test]
async fn evaluate_route_accepts_wire_format() {
    let router = scoring_router(service());

    let response = router
        .oneshot(post_json(
            "/api/v1/scoring/evaluate",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 1, "effect_size": 0.10, "importance": 100},
                    {"label": "HeartFailure", "direction": 1, "effect_size": -0.10, "importance": 29}
                ],
                "weighting": "FIXED_SCALE",
                "constraints": {"cost": 0.5, "access": 0.5, "care": 0}
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["per_1000"], 71);
    assert_eq!(body["constraint_band"], "MINOR");
    assert_eq!(body["constraint_severity"], 0.5);
    assert_eq!(body["per_outcome"][0]["label"], "Stroke");
    assert_eq!(body["per_outcome"][0]["direction_class"], "HARM");
    assert_eq!(body["per_outcome"][1]["arrow"], "DOWN");
}

#[tokio::test]
async fn evaluate_route_returns_unprocessable_for_zero_importances() {
    let router = scoring_router(service());

    let response = router
        .oneshot(post_json(
            "/api/v1/scoring/evaluate",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 1, "effect_size": 0.10, "importance": 0}
                ],
                "weighting": "SUM_NORMALIZED"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "division_undefined");
}

#[tokio::test]
async fn evaluate_route_returns_unprocessable_for_invalid_outcomes() {
    let router = scoring_router(service());

    let response = router
        .oneshot(post_json(
            "/api/v1/scoring/evaluate",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 1, "effect_size": 0.10, "importance": 140}
                ],
                "weighting": "FIXED_SCALE"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_outcome");
}

#[tokio::test]
async fn compare_route_returns_both_schemes() {
    let router = scoring_router(service());

    let response = router
        .oneshot(post_json(
            "/api/v1/scoring/compare",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 1, "effect_size": 0.10, "importance": 100},
                    {"label": "HeartFailure", "direction": 1, "effect_size": -0.10, "importance": 29}
                ]
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["sum_normalized"]["per_1000"], 55);
    assert_eq!(body["fixed_scale"]["per_1000"], 71);
    assert_eq!(body["categories_agree"], true);
}

#[tokio::test]
async fn defaults_route_lists_catalog() {
    let router = scoring_router(service());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/outcomes/defaults")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["outcomes"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["outcomes"][4]["direction"], -1);
    assert_eq!(body["max_outcomes"], 7);
}

#[tokio::test]
async fn defaults_score_route_applies_overrides() {
    let router = scoring_router(service());

    let response = router
        .oneshot(post_json(
            "/api/v1/outcomes/defaults/score",
            json!({
                "overrides": [{"label": "Unknown", "importance": 10}],
                "weighting": "FIXED_SCALE"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let router = scoring_router(service());
    let response = router
        .oneshot(post_json(
            "/api/v1/outcomes/defaults/score",
            json!({ "weighting": "SUM_NORMALIZED" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["per_1000"], -10);
    assert_eq!(body["category"], "NET_BENEFICIAL");
}

#[tokio::test]
async fn out_of_domain_wire_values_get_structured_errors() {
    let response = scoring_router(service())
        .oneshot(post_json(
            "/api/v1/scoring/evaluate",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 2, "effect_size": 0.10, "importance": 100}
                ],
                "weighting": "FIXED_SCALE"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_outcome");
    assert!(body["error"].as_str().is_some_and(|text| !text.is_empty()));

    let response = scoring_router(service())
        .oneshot(post_json(
            "/api/v1/scoring/compare",
            json!({
                "outcomes": [
                    {"label": "Stroke", "direction": 1, "effect_size": 0.10, "importance": 100}
                ],
                "constraints": {"cost": 0.7}
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_outcome");
}

#[tokio::test]
async fn malformed_json_gets_structured_bad_request() {
    let response = scoring_router(service())
        .oneshot(
            axum::http::Request::post("/api/v1/outcomes/defaults/score")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{\"weighting\":"))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "malformed_request");
}
