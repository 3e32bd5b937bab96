use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::OutcomeDefinition;
use crate::scoring::OutcomeDirection;

pub(crate) fn parse_definitions<R: Read>(reader: R) -> Result<Vec<OutcomeDefinition>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut definitions = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        definitions.push(OutcomeDefinition {
            label: normalize_label(&row.label),
            direction: row.direction,
            default_effect_size: row.effect_size,
            default_importance: row.importance.unwrap_or(0.0),
        });
    }

    Ok(definitions)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Direction")]
    direction: OutcomeDirection,
    #[serde(rename = "Effect Size")]
    effect_size: f64,
    #[serde(rename = "Importance", default, deserialize_with = "empty_as_none")]
    importance: Option<f64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Strips spreadsheet artefacts (BOMs, zero-width spaces, doubled spaces).
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
