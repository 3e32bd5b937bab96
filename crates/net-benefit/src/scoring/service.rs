use std::sync::Arc;

use super::{
    ComparisonRequest, ConstraintSet, SchemeComparison, ScoringEngine, ScoringError,
    ScoringRequest, ScoringResponse, WeightingStrategy,
};
use crate::catalog::{OutcomeCatalog, OutcomeDefinition, OutcomeOverride};

/// Service composing the session's outcome catalog with the scoring engine.
pub struct ScoringService {
    engine: Arc<ScoringEngine>,
    catalog: Arc<OutcomeCatalog>,
}

impl ScoringService {
    pub fn new(engine: ScoringEngine, catalog: OutcomeCatalog) -> Self {
        Self {
            engine: Arc::new(engine),
            catalog: Arc::new(catalog),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn defaults(&self) -> &[OutcomeDefinition] {
        self.catalog.definitions()
    }

    /// Score a fully specified request.
    pub fn evaluate(&self, request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        self.engine.score(request)
    }

    /// Score a request under both weighting schemes.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<SchemeComparison, ScoringError> {
        self.engine.compare(request)
    }

    /// Score the catalog defaults with the user's edits applied.
    pub fn evaluate_defaults(
        &self,
        overrides: &[OutcomeOverride],
        weighting: WeightingStrategy,
        constraints: &ConstraintSet,
    ) -> Result<ScoringResponse, ScoringError> {
        let outcomes = self
            .catalog
            .session_with_limits(overrides, self.engine.limits())?;
        self.engine.score_set(&outcomes, weighting, constraints)
    }

    /// Both schemes for the catalog defaults with the user's edits applied.
    pub fn compare_defaults(
        &self,
        overrides: &[OutcomeOverride],
        constraints: &ConstraintSet,
    ) -> Result<SchemeComparison, ScoringError> {
        let outcomes = self
            .catalog
            .session_with_limits(overrides, self.engine.limits())?;
        self.engine.compare(&ComparisonRequest {
            outcomes: outcomes.records().to_vec(),
            constraints: *constraints,
        })
    }
}
