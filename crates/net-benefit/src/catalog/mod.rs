//! Default outcome definitions that seed a scoring session.

mod parser;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::scoring::{
    InvalidOutcome, OutcomeDirection, OutcomeLimits, OutcomeRecord, OutcomeSet,
};

/// One row of the decision table: what the outcome is and its starting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDefinition {
    pub label: String,
    pub direction: OutcomeDirection,
    pub default_effect_size: f64,
    pub default_importance: f64,
}

impl OutcomeDefinition {
    pub fn to_record(&self) -> OutcomeRecord {
        OutcomeRecord::new(
            self.label.clone(),
            self.direction,
            self.default_effect_size,
            self.default_importance,
        )
    }
}

/// User edit applied on top of a catalog default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOverride {
    pub label: String,
    #[serde(default)]
    pub effect_size: Option<f64>,
    #[serde(default)]
    pub importance: Option<f64>,
}

/// Ordered set of default outcome definitions supplied at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeCatalog {
    definitions: Vec<OutcomeDefinition>,
}

impl OutcomeCatalog {
    pub fn new(definitions: Vec<OutcomeDefinition>) -> Result<Self, CatalogError> {
        let catalog = Self { definitions };
        catalog.session(&[])?;
        Ok(catalog)
    }

    /// Stroke-prevention decision table shipped with the tool.
    pub fn standard() -> Self {
        let definition = |label: &str, direction, effect_size, importance| OutcomeDefinition {
            label: label.to_string(),
            direction,
            default_effect_size: effect_size,
            default_importance: importance,
        };

        Self {
            definitions: vec![
                definition("Stroke", OutcomeDirection::HarmType, -0.03, 100.0),
                definition("Major bleeding", OutcomeDirection::HarmType, 0.02, 60.0),
                definition("Heart failure", OutcomeDirection::HarmType, -0.01, 40.0),
                definition("Falls", OutcomeDirection::HarmType, 0.01, 30.0),
                definition("Independent living", OutcomeDirection::BenefitType, 0.02, 50.0),
            ],
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let definitions = parser::parse_definitions(reader)?;
        Self::new(definitions)
    }

    pub fn definitions(&self) -> &[OutcomeDefinition] {
        &self.definitions
    }

    pub fn get(&self, label: &str) -> Option<&OutcomeDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.label == label)
    }

    /// Builds the session's outcome set from the defaults plus user edits.
    pub fn session(&self, overrides: &[OutcomeOverride]) -> Result<OutcomeSet, InvalidOutcome> {
        self.session_with_limits(overrides, &OutcomeLimits::default())
    }

    pub fn session_with_limits(
        &self,
        overrides: &[OutcomeOverride],
        limits: &OutcomeLimits,
    ) -> Result<OutcomeSet, InvalidOutcome> {
        let known: HashSet<&str> = self
            .definitions
            .iter()
            .map(|definition| definition.label.as_str())
            .collect();
        if let Some(unknown) = overrides
            .iter()
            .find(|edit| !known.contains(edit.label.as_str()))
        {
            return Err(InvalidOutcome::UnknownLabel(unknown.label.clone()));
        }

        let records = self
            .definitions
            .iter()
            .map(|definition| {
                let mut effect_size = definition.default_effect_size;
                let mut importance = definition.default_importance;
                for edit in overrides.iter().filter(|edit| edit.label == definition.label) {
                    if let Some(value) = edit.effect_size {
                        effect_size = value;
                    }
                    if let Some(value) = edit.importance {
                        importance = value;
                    }
                }
                OutcomeRecord::new(
                    definition.label.clone(),
                    definition.direction,
                    effect_size,
                    importance,
                )
            })
            .collect();

        OutcomeSet::with_limits(records, limits)
    }
}

impl Default for OutcomeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Invalid(InvalidOutcome),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read outcome catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid outcome catalog CSV: {}", err),
            CatalogError::Invalid(err) => write!(f, "outcome catalog rejected: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<InvalidOutcome> for CatalogError {
    fn from(err: InvalidOutcome) -> Self {
        Self::Invalid(err)
    }
}
