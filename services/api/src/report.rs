use crate::infra::{build_scoring_service, parse_override};
use clap::Args;
use net_benefit::catalog::OutcomeOverride;
use net_benefit::config::{AppConfig, ScoringSettings};
use net_benefit::error::AppError;
use net_benefit::scoring::{
    ClinicalArrow, ConstraintLevel, ConstraintSet, OutcomeView, SchemeComparison,
    ScoringResponse, StarMode, WeightingStrategy,
};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub(crate) struct SessionArgs {
    /// Override an outcome default as LABEL=EFFECT:IMPORTANCE (either part may be empty)
    #[arg(long = "set", value_parser = parse_override)]
    pub(crate) overrides: Vec<OutcomeOverride>,
    /// Cost barrier: none, moderate, severe (or 0, 0.5, 1)
    #[arg(long, default_value = "none")]
    pub(crate) cost: ConstraintLevel,
    /// Access barrier: none, moderate, severe (or 0, 0.5, 1)
    #[arg(long, default_value = "none")]
    pub(crate) access: ConstraintLevel,
    /// Caregiving burden: none, moderate, severe (or 0, 0.5, 1)
    #[arg(long, default_value = "none")]
    pub(crate) care: ConstraintLevel,
    /// Load outcome defaults from a CSV file instead of the standard table
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Render three or five stars (overrides APP_STAR_MODE; custom
    /// APP_CONTRIBUTION_THRESHOLDS must match the chosen star count)
    #[arg(long, value_parser = parse_star_mode)]
    pub(crate) stars: Option<StarMode>,
}

impl SessionArgs {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new(self.cost, self.access, self.care)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Weighting scheme: sum-normalized (A) or fixed-scale (B)
    #[arg(long, default_value = "sum-normalized")]
    pub(crate) weighting: WeightingStrategy,
    #[command(flatten)]
    pub(crate) session: SessionArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
}

fn parse_star_mode(raw: &str) -> Result<StarMode, String> {
    StarMode::parse(raw).ok_or_else(|| format!("expected 'three' or 'five', got '{raw}'"))
}

fn scoring_settings(session: &SessionArgs) -> Result<ScoringSettings, AppError> {
    apply_session_settings(AppConfig::load()?.scoring, session)
}

fn apply_session_settings(
    mut settings: ScoringSettings,
    session: &SessionArgs,
) -> Result<ScoringSettings, AppError> {
    if let Some(mode) = session.stars {
        settings = settings.with_star_mode(mode)?;
    }
    if let Some(path) = &session.catalog {
        settings.outcome_catalog = Some(path.clone());
    }
    Ok(settings)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { weighting, session } = args;
    let service = build_scoring_service(&scoring_settings(&session)?)?;

    let response =
        service.evaluate_defaults(&session.overrides, weighting, &session.constraints())?;
    print!("{}", render_response(&response));
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs { session } = args;
    let service = build_scoring_service(&scoring_settings(&session)?)?;

    let comparison = service.compare_defaults(&session.overrides, &session.constraints())?;
    print!("{}", render_comparison(&comparison));
    Ok(())
}

pub(crate) fn render_response(response: &ScoringResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("Net benefit: {}\n", response.weighting.label()));
    out.push_str(&format!(
        "Net score {:+.4} ({:+} per 1000 patients): {}\n",
        response.net_score,
        response.per_1000,
        response.category.label()
    ));
    out.push_str(&format!("{}\n", response.category.narrative()));

    out.push_str("\nOutcomes\n");
    for view in &response.per_outcome {
        out.push_str(&render_outcome(view));
    }

    out.push_str(&format!(
        "\nPractical barriers: {} (worst single barrier {})\n",
        response.constraint_band.label(),
        response.constraint_severity.label()
    ));
    out.push_str(&format!("{}\n", response.constraint_band.narrative()));
    out
}

pub(crate) fn render_comparison(comparison: &SchemeComparison) -> String {
    let mut out = render_response(&comparison.sum_normalized);
    out.push('\n');
    out.push_str(&render_response(&comparison.fixed_scale));
    out.push_str(&format!(
        "\nSchemes {} (difference {:+.4})\n",
        if comparison.categories_agree {
            "agree"
        } else {
            "disagree"
        },
        comparison.net_score_difference
    ));
    out
}

fn render_outcome(view: &OutcomeView) -> String {
    format!(
        "- {:<20} {} {:<9} {:<8} {:+.4} importance {}\n",
        view.label,
        arrow_glyph(view.arrow),
        stars(view.rating, view.max_stars),
        view.band.label(),
        view.contribution,
        stars(view.importance_rating.rating, view.importance_rating.max_stars),
    )
}

fn stars(rating: u8, max_stars: u8) -> String {
    if rating == 0 {
        return "-".to_string();
    }
    let filled = usize::from(rating.min(max_stars));
    let empty = usize::from(max_stars) - filled;
    format!("{}{}", "*".repeat(filled), ".".repeat(empty))
}

fn arrow_glyph(arrow: ClinicalArrow) -> &'static str {
    match arrow {
        ClinicalArrow::Up => "^",
        ClinicalArrow::Flat => "=",
        ClinicalArrow::Down => "v",
    }
}
