use serde::{Deserialize, Serialize};

use super::contribution::{contributions, OutcomeContribution};
use super::domain::OutcomeSet;
use super::weighting::WeightingStrategy;
use super::ScoringError;

/// Scores closer to zero than this are reported as neutral.
pub const NEUTRAL_EPSILON: f64 = 1e-9;

/// Interpretation of the net score. Positive scores lean harmful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetCategory {
    NetHarmful,
    Neutral,
    NetBeneficial,
}

impl NetCategory {
    pub fn from_score(net_score: f64) -> Self {
        if net_score.abs() < NEUTRAL_EPSILON {
            Self::Neutral
        } else if net_score > 0.0 {
            Self::NetHarmful
        } else {
            Self::NetBeneficial
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NetHarmful => "Net harmful",
            Self::Neutral => "Neutral",
            Self::NetBeneficial => "Net beneficial",
        }
    }

    pub const fn narrative(self) -> &'static str {
        match self {
            Self::NetHarmful => {
                "Weighted by your priorities, the expected harms outweigh the expected benefits."
            }
            Self::Neutral => "Weighted by your priorities, benefits and harms balance out.",
            Self::NetBeneficial => {
                "Weighted by your priorities, the expected benefits outweigh the expected harms."
            }
        }
    }
}

/// Net score expressed as events per 1000 patients, rounding half away from zero.
pub fn per_thousand(net_score: f64) -> i64 {
    (net_score * 1000.0).round() as i64
}

/// Everything the aggregator derives from one outcome set and one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub weighting: WeightingStrategy,
    pub net_score: f64,
    pub per_1000: i64,
    pub category: NetCategory,
    pub contributions: Vec<OutcomeContribution>,
}

pub fn aggregate(
    outcomes: &OutcomeSet,
    weighting: WeightingStrategy,
) -> Result<SessionAggregate, ScoringError> {
    let weights = weighting.weights(outcomes)?;
    let contributions = contributions(outcomes, &weights);
    let net_score: f64 = contributions.iter().map(|entry| entry.contribution).sum();
    // Benefit-type outcomes with zero weight contribute -0.0; report plain zero.
    let net_score = if net_score == 0.0 { 0.0 } else { net_score };

    Ok(SessionAggregate {
        weighting,
        net_score,
        per_1000: per_thousand(net_score),
        category: NetCategory::from_score(net_score),
        contributions,
    })
}
