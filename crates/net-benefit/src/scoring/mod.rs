//! Net benefit scoring: weighting, contributions, aggregation and the
//! discretized indicators handed to the presentation layer.

mod aggregate;
mod constraints;
mod contribution;
mod discretize;
pub mod domain;
pub mod router;
pub mod service;
mod views;
mod weighting;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, per_thousand, NetCategory, SessionAggregate, NEUTRAL_EPSILON};
pub use constraints::{ConstraintBand, ConstraintLevel, ConstraintSet, ConstraintSummary};
pub use contribution::{contribution, OutcomeContribution};
pub use discretize::{
    Band, ClinicalArrow, ConfigurationError, DirectionClass, Discretizer, DiscretizerConfig,
    Indicator, StarMode, StarRating, StarScale, DEFAULT_ARROW_THRESHOLD,
};
pub use domain::{
    InvalidOutcome, OutcomeDirection, OutcomeLimits, OutcomeRecord, OutcomeSet,
    DEFAULT_MAX_OUTCOMES, IMPORTANCE_SCALE_MAX,
};
pub use router::scoring_router;
pub use service::ScoringService;
pub use views::{
    ComparisonRequest, OutcomeView, SchemeComparison, ScoringRequest, ScoringResponse,
};
pub use weighting::WeightingStrategy;

use tracing::{debug, warn};

/// Stateless evaluator that applies the discretizer configuration to requests.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    limits: OutcomeLimits,
    discretizer: Discretizer,
}

impl ScoringEngine {
    pub fn new(discretizer: Discretizer) -> Self {
        Self::with_limits(discretizer, OutcomeLimits::default())
    }

    pub fn with_limits(discretizer: Discretizer, limits: OutcomeLimits) -> Self {
        Self {
            limits,
            discretizer,
        }
    }

    pub fn limits(&self) -> &OutcomeLimits {
        &self.limits
    }

    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    pub fn score(&self, request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        let outcomes = OutcomeSet::with_limits(request.outcomes.clone(), &self.limits)
            .inspect_err(|error| warn!(%error, "rejected outcome set"))?;
        self.score_set(&outcomes, request.weighting, &request.constraints)
    }

    pub fn score_set(
        &self,
        outcomes: &OutcomeSet,
        weighting: WeightingStrategy,
        constraints: &ConstraintSet,
    ) -> Result<ScoringResponse, ScoringError> {
        let aggregate = aggregate(outcomes, weighting)?;
        let constraint_summary = constraints.summary();

        debug!(
            weighting = ?weighting,
            outcomes = outcomes.len(),
            net_score = aggregate.net_score,
            category = ?aggregate.category,
            "scored outcome set"
        );

        let per_outcome = aggregate
            .contributions
            .iter()
            .map(|entry| {
                let signals = self.discretizer.outcome_signals(entry);
                OutcomeView {
                    label: entry.label.clone(),
                    contribution: entry.contribution,
                    weight: entry.weight,
                    rating: signals.indicator.rating,
                    max_stars: signals.max_stars,
                    band: signals.indicator.band,
                    direction_class: signals.indicator.direction_class,
                    arrow: signals.arrow,
                    importance_rating: signals.importance_rating,
                }
            })
            .collect();

        Ok(ScoringResponse {
            weighting,
            net_score: aggregate.net_score,
            per_1000: aggregate.per_1000,
            category: aggregate.category,
            per_outcome,
            constraint_band: constraint_summary.band,
            constraint_severity: constraint_summary.severity,
            constraint_total: constraint_summary.total,
        })
    }

    /// Scores the same inputs under Scheme A and Scheme B.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<SchemeComparison, ScoringError> {
        let sum_normalized = self.score(&request.with_weighting(WeightingStrategy::SumNormalized))?;
        let fixed_scale = self.score(&request.with_weighting(WeightingStrategy::FixedScale))?;

        Ok(SchemeComparison {
            categories_agree: sum_normalized.category == fixed_scale.category,
            net_score_difference: sum_normalized.net_score - fixed_scale.net_score,
            sum_normalized,
            fixed_scale,
        })
    }
}

/// Error raised while scoring a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("sum-normalized weighting is undefined when every importance is zero; raise at least one importance above zero")]
    DivisionUndefined,
    #[error(transparent)]
    InvalidOutcome(#[from] InvalidOutcome),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ScoringError {
    /// Machine-readable discriminator for API payloads.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DivisionUndefined => "division_undefined",
            Self::InvalidOutcome(_) => "invalid_outcome",
            Self::Configuration(_) => "configuration_error",
        }
    }

    /// Whether the caller can fix this by changing the inputs.
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::DivisionUndefined | Self::InvalidOutcome(_))
    }
}
