use serde::{Deserialize, Serialize};

/// Ordinal level of one practical barrier, carried on the wire as 0, 0.5 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ConstraintLevel {
    #[default]
    None,
    Moderate,
    Severe,
}

impl ConstraintLevel {
    pub const fn value(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Moderate => 0.5,
            Self::Severe => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl TryFrom<f64> for ConstraintLevel {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Self::None)
        } else if value == 0.5 {
            Ok(Self::Moderate)
        } else if value == 1.0 {
            Ok(Self::Severe)
        } else {
            Err(format!("constraint level must be 0, 0.5 or 1, got {value}"))
        }
    }
}

impl From<ConstraintLevel> for f64 {
    fn from(value: ConstraintLevel) -> Self {
        value.value()
    }
}

impl std::str::FromStr for ConstraintLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            other => other
                .parse::<f64>()
                .map_err(|_| format!("unrecognised constraint level '{other}'"))
                .and_then(Self::try_from),
        }
    }
}

/// Banded reading of the summed constraint levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintBand {
    NoBarrier,
    Minor,
    Moderate,
    Severe,
}

impl ConstraintBand {
    pub fn from_total(total: f64) -> Self {
        if total <= 0.0 {
            Self::NoBarrier
        } else if total <= 1.0 {
            Self::Minor
        } else if total <= 2.0 {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoBarrier => "No barrier",
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    pub const fn narrative(self) -> &'static str {
        match self {
            Self::NoBarrier => "No practical barriers to starting this treatment were reported.",
            Self::Minor => "Some practical barriers exist but are unlikely to block treatment.",
            Self::Moderate => "Practical barriers may make it hard to continue this treatment.",
            Self::Severe => "Practical barriers are substantial; discuss support options first.",
        }
    }
}

/// Cost, access and caregiving burden as selected by the patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default)]
    pub cost: ConstraintLevel,
    #[serde(default)]
    pub access: ConstraintLevel,
    #[serde(default)]
    pub care: ConstraintLevel,
}

impl ConstraintSet {
    pub fn new(cost: ConstraintLevel, access: ConstraintLevel, care: ConstraintLevel) -> Self {
        Self { cost, access, care }
    }

    /// Worst single barrier.
    pub fn severity(&self) -> ConstraintLevel {
        self.cost.max(self.access).max(self.care)
    }

    pub fn total(&self) -> f64 {
        self.cost.value() + self.access.value() + self.care.value()
    }

    pub fn band(&self) -> ConstraintBand {
        ConstraintBand::from_total(self.total())
    }

    pub fn summary(&self) -> ConstraintSummary {
        ConstraintSummary {
            band: self.band(),
            severity: self.severity(),
            total: self.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSummary {
    pub band: ConstraintBand,
    pub severity: ConstraintLevel,
    pub total: f64,
}
