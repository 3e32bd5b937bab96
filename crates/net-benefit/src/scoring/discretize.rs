//! Presentation-facing discretization of continuous scores.
//!
//! Two independent signals come out of here: a star rating with its band,
//! driven by the magnitude of a value against a [`StarScale`], and a
//! direction. The direction is either the class of the weighted contribution
//! or the clinical arrow of the raw `effect_size * direction`; the arrow
//! ignores importance weighting entirely.

use serde::{Deserialize, Serialize};

use super::aggregate::NEUTRAL_EPSILON;
use super::contribution::OutcomeContribution;

/// Default threshold on `|effect_size * direction|` before an arrow tilts.
pub const DEFAULT_ARROW_THRESHOLD: f64 = 0.005;

/// Which star preset a deployment renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarMode {
    Three,
    Five,
}

impl StarMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "3" | "three" => Some(Self::Three),
            "5" | "five" => Some(Self::Five),
            _ => None,
        }
    }
}

/// Ascending inclusive lower bounds, one per star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStarScale")]
pub struct StarScale {
    max_stars: u8,
    thresholds: Vec<f64>,
}

#[derive(Deserialize)]
struct RawStarScale {
    max_stars: u8,
    thresholds: Vec<f64>,
}

impl TryFrom<RawStarScale> for StarScale {
    type Error = ConfigurationError;

    fn try_from(raw: RawStarScale) -> Result<Self, Self::Error> {
        Self::new(raw.max_stars, raw.thresholds)
    }
}

impl StarScale {
    pub fn new(max_stars: u8, thresholds: Vec<f64>) -> Result<Self, ConfigurationError> {
        if max_stars == 0 {
            return Err(ConfigurationError::NoStars);
        }
        if thresholds.len() != usize::from(max_stars) {
            return Err(ConfigurationError::ThresholdCountMismatch {
                max_stars,
                thresholds: thresholds.len(),
            });
        }
        for (index, threshold) in thresholds.iter().enumerate() {
            if !threshold.is_finite() || *threshold < 0.0 {
                return Err(ConfigurationError::InvalidThreshold {
                    index,
                    value: *threshold,
                });
            }
        }
        if let Some(index) = thresholds
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            return Err(ConfigurationError::ThresholdsNotIncreasing { index: index + 1 });
        }

        Ok(Self {
            max_stars,
            thresholds,
        })
    }

    pub fn contribution_preset(mode: StarMode) -> Self {
        match mode {
            StarMode::Three => Self {
                max_stars: 3,
                thresholds: vec![0.005, 0.02, 0.05],
            },
            StarMode::Five => Self {
                max_stars: 5,
                thresholds: vec![0.001, 0.005, 0.01, 0.02, 0.05],
            },
        }
    }

    pub fn importance_preset(mode: StarMode) -> Self {
        match mode {
            StarMode::Three => Self {
                max_stars: 3,
                thresholds: vec![1.0, 34.0, 67.0],
            },
            StarMode::Five => Self {
                max_stars: 5,
                thresholds: vec![1.0, 20.0, 40.0, 60.0, 80.0],
            },
        }
    }

    pub fn max_stars(&self) -> u8 {
        self.max_stars
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of thresholds `|value|` reaches. Zero is the dash rating.
    pub fn rating(&self, value: f64) -> u8 {
        let magnitude = value.abs();
        self.thresholds
            .iter()
            .take_while(|threshold| magnitude >= **threshold)
            .count() as u8
    }

    pub fn band(&self, rating: u8) -> Band {
        let rating = u16::from(rating.min(self.max_stars));
        let max = u16::from(self.max_stars);
        if rating == 0 {
            Band::Neutral
        } else if rating * 3 <= max {
            Band::Low
        } else if rating * 3 <= max * 2 {
            Band::Moderate
        } else {
            Band::High
        }
    }

    pub fn rate(&self, value: f64) -> StarRating {
        let rating = self.rating(value);
        StarRating {
            rating,
            max_stars: self.max_stars,
            band: self.band(rating),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    Neutral,
    Low,
    Moderate,
    High,
}

impl Band {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRating {
    pub rating: u8,
    pub max_stars: u8,
    pub band: Band,
}

impl StarRating {
    pub fn is_dash(&self) -> bool {
        self.rating == 0
    }
}

/// Color class of a weighted contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectionClass {
    Harm,
    Benefit,
    Neutral,
}

impl DirectionClass {
    pub fn from_contribution(contribution: f64) -> Self {
        if contribution.abs() < NEUTRAL_EPSILON {
            Self::Neutral
        } else if contribution > 0.0 {
            Self::Harm
        } else {
            Self::Benefit
        }
    }
}

/// Raw clinical direction of `effect_size * direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClinicalArrow {
    /// Treatment pushes toward harm.
    Up,
    Flat,
    /// Treatment pushes toward benefit.
    Down,
}

/// Star rating, band and color class of one weighted contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub rating: u8,
    pub band: Band,
    pub direction_class: DirectionClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizerConfig {
    pub contribution_scale: StarScale,
    pub importance_scale: StarScale,
    pub arrow_threshold: f64,
}

impl DiscretizerConfig {
    pub fn for_mode(mode: StarMode) -> Self {
        Self {
            contribution_scale: StarScale::contribution_preset(mode),
            importance_scale: StarScale::importance_preset(mode),
            arrow_threshold: DEFAULT_ARROW_THRESHOLD,
        }
    }
}

impl Default for DiscretizerConfig {
    fn default() -> Self {
        Self::for_mode(StarMode::Five)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discretizer {
    config: DiscretizerConfig,
}

impl Discretizer {
    pub fn new(config: DiscretizerConfig) -> Result<Self, ConfigurationError> {
        if !config.arrow_threshold.is_finite() || config.arrow_threshold <= 0.0 {
            return Err(ConfigurationError::InvalidArrowThreshold(
                config.arrow_threshold,
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &DiscretizerConfig {
        &self.config
    }

    pub fn indicator(&self, contribution: f64) -> Indicator {
        let stars = self.config.contribution_scale.rate(contribution);
        Indicator {
            rating: stars.rating,
            band: stars.band,
            direction_class: DirectionClass::from_contribution(contribution),
        }
    }

    pub fn arrow(&self, signed_effect: f64) -> ClinicalArrow {
        let threshold = self.config.arrow_threshold;
        if signed_effect >= threshold {
            ClinicalArrow::Up
        } else if signed_effect <= -threshold {
            ClinicalArrow::Down
        } else {
            ClinicalArrow::Flat
        }
    }

    pub fn importance_rating(&self, importance: f64) -> StarRating {
        self.config.importance_scale.rate(importance)
    }

    pub(crate) fn outcome_signals(&self, entry: &OutcomeContribution) -> OutcomeSignals {
        OutcomeSignals {
            indicator: self.indicator(entry.contribution),
            max_stars: self.config.contribution_scale.max_stars(),
            arrow: self.arrow(entry.signed_effect()),
            importance_rating: self.importance_rating(entry.importance),
        }
    }
}

impl Default for Discretizer {
    fn default() -> Self {
        Self {
            config: DiscretizerConfig::default(),
        }
    }
}

pub(crate) struct OutcomeSignals {
    pub indicator: Indicator,
    pub max_stars: u8,
    pub arrow: ClinicalArrow,
    pub importance_rating: StarRating,
}

/// Rejected discretizer configuration; fatal for that configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("a star scale needs at least one star")]
    NoStars,
    #[error("max_stars is {max_stars} but {thresholds} thresholds were supplied")]
    ThresholdCountMismatch { max_stars: u8, thresholds: usize },
    #[error("threshold {index} ({value}) must be a finite, non-negative number")]
    InvalidThreshold { index: usize, value: f64 },
    #[error("threshold {index} does not exceed the threshold before it")]
    ThresholdsNotIncreasing { index: usize },
    #[error("arrow threshold {0} must be a finite, positive number")]
    InvalidArrowThreshold(f64),
}
