use serde::{Deserialize, Serialize};

use super::domain::{OutcomeSet, IMPORTANCE_SCALE_MAX};
use super::ScoringError;

/// Closed set of rules turning importances into per-outcome weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightingStrategy {
    /// Scheme A: `i_k / Σ i_j`, weights always sum to one.
    SumNormalized,
    /// Scheme B: `i_k / 100`, weights keep the patient's absolute scale.
    FixedScale,
}

impl WeightingStrategy {
    pub const ALL: [WeightingStrategy; 2] = [Self::SumNormalized, Self::FixedScale];

    pub const fn label(self) -> &'static str {
        match self {
            Self::SumNormalized => "Scheme A (sum-normalized)",
            Self::FixedScale => "Scheme B (fixed-scale)",
        }
    }

    /// Weights in the same order as `outcomes.records()`.
    pub fn weights(self, outcomes: &OutcomeSet) -> Result<Vec<f64>, ScoringError> {
        match self {
            Self::SumNormalized => {
                let total = outcomes.total_importance();
                if total <= 0.0 {
                    return Err(ScoringError::DivisionUndefined);
                }
                Ok(outcomes
                    .records()
                    .iter()
                    .map(|record| record.importance() / total)
                    .collect())
            }
            Self::FixedScale => Ok(outcomes
                .records()
                .iter()
                .map(|record| record.importance() / IMPORTANCE_SCALE_MAX)
                .collect()),
        }
    }
}

impl std::str::FromStr for WeightingStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sum_normalized" | "sum" | "a" | "scheme_a" => Ok(Self::SumNormalized),
            "fixed_scale" | "fixed" | "b" | "scheme_b" => Ok(Self::FixedScale),
            other => Err(format!(
                "unknown weighting '{other}', expected sum-normalized or fixed-scale"
            )),
        }
    }
}
