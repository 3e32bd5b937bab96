use super::common::*;
use crate::catalog::OutcomeCatalog;
use crate::scoring::{aggregate, per_thousand, NetCategory, ScoringError, WeightingStrategy};

#[test]
fn fixed_scale_reproduces_worked_example() {
    let outcomes = outcome_set(stroke_and_heart_failure());

    let result = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");

    assert_close(result.contributions[0].contribution, 0.10);
    assert_close(result.contributions[1].contribution, -0.029);
    assert_close(result.net_score, 0.071);
    assert_eq!(result.per_1000, 71);
    assert_eq!(result.category, NetCategory::NetHarmful);
}

#[test]
fn sum_normalized_scores_same_example_on_relative_scale() {
    let outcomes = outcome_set(stroke_and_heart_failure());

    let result = aggregate(&outcomes, WeightingStrategy::SumNormalized).expect("aggregates");

    assert_close(result.net_score, 7.1 / 129.0);
    assert_eq!(result.per_1000, 55);
    assert_eq!(result.category, NetCategory::NetHarmful);
}

#[test]
fn standard_catalog_sum_normalized_matches_golden_score() {
    let outcomes = OutcomeCatalog::standard()
        .session(&[])
        .expect("standard catalog is valid");

    let result = aggregate(&outcomes, WeightingStrategy::SumNormalized).expect("aggregates");

    assert!((result.net_score - (-0.010357142857142858)).abs() < 1e-15);
    assert_eq!(result.per_1000, -10);
    assert_eq!(result.category, NetCategory::NetBeneficial);
}

#[test]
fn standard_catalog_fixed_scale_matches_golden_score() {
    let outcomes = OutcomeCatalog::standard()
        .session(&[])
        .expect("standard catalog is valid");

    let result = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");

    assert_close(result.net_score, -0.029);
    assert_eq!(result.per_1000, -29);
    assert_eq!(result.category, NetCategory::NetBeneficial);
}

#[test]
fn zero_importances_fail_sum_normalized_but_are_neutral_under_fixed_scale() {
    let outcomes = zero_importance_set();

    assert_eq!(
        aggregate(&outcomes, WeightingStrategy::SumNormalized),
        Err(ScoringError::DivisionUndefined)
    );

    let fixed = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");
    assert_eq!(fixed.net_score, 0.0);
    assert!(fixed.net_score.is_sign_positive());
    assert_eq!(fixed.per_1000, 0);
    assert_eq!(fixed.category, NetCategory::Neutral);
}

#[test]
fn fixed_scale_net_score_equals_closed_form_sum() {
    let cases = vec![
        stroke_and_heart_failure(),
        vec![
            harm("Stroke", -0.2, 85.0),
            benefit("Mobility", 0.15, 12.5),
            harm("Bleeding", 0.07, 3.0),
        ],
        vec![benefit("Quality of life", -0.11, 100.0)],
        vec![
            harm("A", 0.013, 1.0),
            harm("B", -0.017, 99.0),
            benefit("C", 0.19, 47.0),
            benefit("D", -0.05, 66.0),
            harm("E", 0.0, 100.0),
            harm("F", 0.2, 0.0),
            benefit("G", 0.001, 50.0),
        ],
    ];

    for records in cases {
        let expected: f64 = records
            .iter()
            .map(|record| {
                record.effect_size() * record.importance() / 100.0 * record.direction().sign()
            })
            .sum();
        let outcomes = outcome_set(records);
        let result = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");
        assert_close(result.net_score, expected);
    }
}

#[test]
fn raising_importance_grows_contribution_magnitude_without_flipping_sign() {
    for (effect_size, direction_is_harm) in [(0.08, true), (-0.05, true), (0.12, false)] {
        let mut previous: Option<f64> = None;
        for step in 0..=20 {
            let importance = f64::from(step) * 5.0;
            let record = if direction_is_harm {
                harm("Outcome", effect_size, importance)
            } else {
                benefit("Outcome", effect_size, importance)
            };
            let expected_sign = effect_size * record.direction().sign();
            let outcomes = outcome_set(vec![record, harm("Anchor", 0.01, 50.0)]);

            let result = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");
            let contribution = result.contributions[0].contribution;

            if contribution != 0.0 {
                assert_eq!(contribution.signum(), expected_sign.signum());
            }
            if let Some(previous) = previous {
                assert!(contribution.abs() >= previous);
            }
            previous = Some(contribution.abs());
        }
    }
}

#[test]
fn category_respects_neutral_epsilon() {
    assert_eq!(NetCategory::from_score(5e-10), NetCategory::Neutral);
    assert_eq!(NetCategory::from_score(-5e-10), NetCategory::Neutral);
    assert_eq!(NetCategory::from_score(2e-9), NetCategory::NetHarmful);
    assert_eq!(NetCategory::from_score(-2e-9), NetCategory::NetBeneficial);
}

#[test]
fn per_thousand_rounds_half_away_from_zero() {
    assert_eq!(per_thousand(0.0625), 63);
    assert_eq!(per_thousand(-0.0625), -63);
    assert_eq!(per_thousand(0.0004), 0);
    assert_eq!(per_thousand(-0.0106), -11);
}

#[test]
fn contributions_are_exposed_in_input_order() {
    let outcomes = outcome_set(stroke_and_heart_failure());

    let result = aggregate(&outcomes, WeightingStrategy::FixedScale).expect("aggregates");

    let labels: Vec<_> = result
        .contributions
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Stroke", "HeartFailure"]);
    assert_eq!(result.contributions[1].weight, 0.29);
}
