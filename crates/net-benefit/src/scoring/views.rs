use serde::{Deserialize, Serialize};

use super::aggregate::NetCategory;
use super::constraints::{ConstraintBand, ConstraintLevel, ConstraintSet};
use super::discretize::{Band, ClinicalArrow, DirectionClass, StarRating};
use super::domain::OutcomeRecord;
use super::weighting::WeightingStrategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub outcomes: Vec<OutcomeRecord>,
    pub weighting: WeightingStrategy,
    #[serde(default)]
    pub constraints: ConstraintSet,
}

/// Same inputs as [`ScoringRequest`], scored under every weighting scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub outcomes: Vec<OutcomeRecord>,
    #[serde(default)]
    pub constraints: ConstraintSet,
}

impl ComparisonRequest {
    pub(crate) fn with_weighting(&self, weighting: WeightingStrategy) -> ScoringRequest {
        ScoringRequest {
            outcomes: self.outcomes.clone(),
            weighting,
            constraints: self.constraints,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub label: String,
    pub contribution: f64,
    pub weight: f64,
    pub rating: u8,
    pub max_stars: u8,
    pub band: Band,
    pub direction_class: DirectionClass,
    pub arrow: ClinicalArrow,
    pub importance_rating: StarRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub weighting: WeightingStrategy,
    pub net_score: f64,
    pub per_1000: i64,
    pub category: NetCategory,
    pub per_outcome: Vec<OutcomeView>,
    pub constraint_band: ConstraintBand,
    pub constraint_severity: ConstraintLevel,
    pub constraint_total: f64,
}

impl ScoringResponse {
    pub fn outcome(&self, label: &str) -> Option<&OutcomeView> {
        self.per_outcome.iter().find(|view| view.label == label)
    }
}

/// Scheme A and Scheme B side by side for the same outcome set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeComparison {
    pub sum_normalized: ScoringResponse,
    pub fixed_scale: ScoringResponse,
    pub categories_agree: bool,
    /// `sum_normalized.net_score - fixed_scale.net_score`.
    pub net_score_difference: f64,
}
