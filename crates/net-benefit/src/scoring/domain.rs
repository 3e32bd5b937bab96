use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Maximum number of outcomes a single scoring session may hold.
pub const DEFAULT_MAX_OUTCOMES: usize = 7;

/// Upper bound of the importance scale; also the Fixed-Scale divisor.
pub const IMPORTANCE_SCALE_MAX: f64 = 100.0;

/// Effect sizes are absolute risk differences, so they never leave `[-1, 1]`.
pub const DEFAULT_EFFECT_SIZE_BOUND: f64 = 1.0;

/// Whether a positive effect size is bad or good news for the patient.
///
/// Serialized as the signed unit `+1` / `-1` used in the decision tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum OutcomeDirection {
    /// `+1`: a positive effect size means more of an adverse event.
    HarmType,
    /// `-1`: a positive effect size means more of a desirable outcome.
    BenefitType,
}

impl OutcomeDirection {
    pub const fn sign(self) -> f64 {
        match self {
            Self::HarmType => 1.0,
            Self::BenefitType => -1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HarmType => "harm-type",
            Self::BenefitType => "benefit-type",
        }
    }
}

impl TryFrom<i8> for OutcomeDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::HarmType),
            -1 => Ok(Self::BenefitType),
            other => Err(format!("direction must be +1 or -1, got {other}")),
        }
    }
}

impl From<OutcomeDirection> for i8 {
    fn from(value: OutcomeDirection) -> Self {
        match value {
            OutcomeDirection::HarmType => 1,
            OutcomeDirection::BenefitType => -1,
        }
    }
}

/// One clinical outcome as it enters a scoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    label: String,
    direction: OutcomeDirection,
    effect_size: f64,
    importance: f64,
}

impl OutcomeRecord {
    pub fn new(
        label: impl Into<String>,
        direction: OutcomeDirection,
        effect_size: f64,
        importance: f64,
    ) -> Self {
        Self {
            label: label.into(),
            direction,
            effect_size,
            importance,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn direction(&self) -> OutcomeDirection {
        self.direction
    }

    pub fn effect_size(&self) -> f64 {
        self.effect_size
    }

    pub fn importance(&self) -> f64 {
        self.importance
    }
}

/// Domain bounds applied when an [`OutcomeSet`] is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeLimits {
    pub max_outcomes: usize,
    pub effect_size_bound: f64,
}

impl Default for OutcomeLimits {
    fn default() -> Self {
        Self {
            max_outcomes: DEFAULT_MAX_OUTCOMES,
            effect_size_bound: DEFAULT_EFFECT_SIZE_BOUND,
        }
    }
}

/// Validated, ordered collection of outcomes for one scoring session.
///
/// Construction is the only validation point: once an `OutcomeSet` exists
/// every downstream computation is total.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSet {
    records: Vec<OutcomeRecord>,
}

impl OutcomeSet {
    pub fn new(records: Vec<OutcomeRecord>) -> Result<Self, InvalidOutcome> {
        Self::with_limits(records, &OutcomeLimits::default())
    }

    pub fn with_limits(
        records: Vec<OutcomeRecord>,
        limits: &OutcomeLimits,
    ) -> Result<Self, InvalidOutcome> {
        if records.is_empty() {
            return Err(InvalidOutcome::Empty);
        }
        if records.len() > limits.max_outcomes {
            return Err(InvalidOutcome::TooMany {
                count: records.len(),
                max: limits.max_outcomes,
            });
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            validate_record(record, limits)?;
            if !seen.insert(record.label.as_str()) {
                return Err(InvalidOutcome::DuplicateLabel(record.label.clone()));
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_importance(&self) -> f64 {
        self.records.iter().map(OutcomeRecord::importance).sum()
    }

    pub fn get(&self, label: &str) -> Option<&OutcomeRecord> {
        self.records.iter().find(|record| record.label == label)
    }
}

fn validate_record(record: &OutcomeRecord, limits: &OutcomeLimits) -> Result<(), InvalidOutcome> {
    if record.label.trim().is_empty() {
        return Err(InvalidOutcome::BlankLabel);
    }
    if !record.effect_size.is_finite() {
        return Err(InvalidOutcome::NonFinite {
            label: record.label.clone(),
            field: "effect_size",
        });
    }
    if !record.importance.is_finite() {
        return Err(InvalidOutcome::NonFinite {
            label: record.label.clone(),
            field: "importance",
        });
    }
    if record.effect_size.abs() > limits.effect_size_bound {
        return Err(InvalidOutcome::EffectSizeOutOfRange {
            label: record.label.clone(),
            value: record.effect_size,
            bound: limits.effect_size_bound,
        });
    }
    if !(0.0..=IMPORTANCE_SCALE_MAX).contains(&record.importance) {
        return Err(InvalidOutcome::ImportanceOutOfRange {
            label: record.label.clone(),
            value: record.importance,
        });
    }
    Ok(())
}

/// Reasons an outcome collection is rejected before scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidOutcome {
    #[error("at least one outcome is required")]
    Empty,
    #[error("{count} outcomes supplied, at most {max} are supported")]
    TooMany { count: usize, max: usize },
    #[error("outcome labels must not be blank")]
    BlankLabel,
    #[error("outcome label '{0}' appears more than once")]
    DuplicateLabel(String),
    #[error("outcome '{label}' has a non-finite {field}")]
    NonFinite { label: String, field: &'static str },
    #[error("outcome '{label}' effect size {value} is outside [-{bound}, {bound}]")]
    EffectSizeOutOfRange {
        label: String,
        value: f64,
        bound: f64,
    },
    #[error("outcome '{label}' importance {value} is outside [0, 100]")]
    ImportanceOutOfRange { label: String, value: f64 },
    #[error("no outcome named '{0}' in the catalog")]
    UnknownLabel(String),
}
