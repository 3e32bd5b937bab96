use metrics_exporter_prometheus::PrometheusHandle;
use net_benefit::catalog::{OutcomeCatalog, OutcomeOverride};
use net_benefit::config::ScoringSettings;
use net_benefit::error::AppError;
use net_benefit::scoring::{ScoringEngine, ScoringService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the session catalog and discretizer described by the settings.
pub(crate) fn build_scoring_service(settings: &ScoringSettings) -> Result<ScoringService, AppError> {
    let catalog = match &settings.outcome_catalog {
        Some(path) => {
            let catalog = OutcomeCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                outcomes = catalog.definitions().len(),
                "loaded outcome catalog"
            );
            catalog
        }
        None => OutcomeCatalog::standard(),
    };

    let engine = ScoringEngine::new(settings.build_discretizer()?);
    Ok(ScoringService::new(engine, catalog))
}

/// Parses `LABEL=EFFECT:IMPORTANCE`; either number may be left empty.
pub(crate) fn parse_override(raw: &str) -> Result<OutcomeOverride, String> {
    let (label, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=EFFECT:IMPORTANCE, got '{raw}'"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing outcome label in '{raw}'"));
    }

    let (effect, importance) = match values.split_once(':') {
        Some((effect, importance)) => (effect, importance),
        None => (values, ""),
    };

    Ok(OutcomeOverride {
        label: label.to_string(),
        effect_size: parse_optional_number(effect, "effect size")?,
        importance: parse_optional_number(importance, "importance")?,
    })
}

fn parse_optional_number(raw: &str, field: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| format!("failed to parse {field} '{trimmed}' ({err})"))
}
