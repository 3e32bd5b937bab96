//! Net benefit scoring for clinical shared decision making.
//!
//! Given treatment outcomes with effect sizes and the patient's importance
//! weights, the [`scoring`] module produces a signed net score, a per-1000
//! count, an interpretation category and discretized per-outcome indicators.
//! Default outcome definitions come from a [`catalog`] supplied at session
//! start.

pub mod catalog;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
