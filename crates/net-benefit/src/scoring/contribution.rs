use serde::{Deserialize, Serialize};

use super::domain::{OutcomeDirection, OutcomeRecord, OutcomeSet};

/// Signed share of the net score attributable to one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeContribution {
    pub label: String,
    pub direction: OutcomeDirection,
    pub effect_size: f64,
    pub importance: f64,
    pub weight: f64,
    pub contribution: f64,
}

impl OutcomeContribution {
    /// Raw clinical direction, independent of the patient's weighting.
    pub fn signed_effect(&self) -> f64 {
        self.effect_size * self.direction.sign()
    }
}

/// `effect_size * weight * direction`; positive leans harmful.
pub fn contribution(record: &OutcomeRecord, weight: f64) -> f64 {
    record.effect_size() * weight * record.direction().sign()
}

pub(crate) fn contributions(outcomes: &OutcomeSet, weights: &[f64]) -> Vec<OutcomeContribution> {
    debug_assert_eq!(outcomes.len(), weights.len());

    outcomes
        .records()
        .iter()
        .zip(weights)
        .map(|(record, &weight)| OutcomeContribution {
            label: record.label().to_string(),
            direction: record.direction(),
            effect_size: record.effect_size(),
            importance: record.importance(),
            weight,
            contribution: contribution(record, weight),
        })
        .collect()
}
