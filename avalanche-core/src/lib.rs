//! Avalanche core library - rule-based avalanche danger classification

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is pure and stateless
// - No global mutable state; the danger scale is a constant
// - No randomness, clocks, threads, network, or async
// - Identical input yields identical output

pub mod config;
pub mod error;
pub mod factors;
pub mod reading;
pub mod report;
pub mod risk;
pub mod scale;
pub mod telemetry;

pub use error::AssessmentError;
pub use factors::{Factor, FactorScore, FactorScores};
pub use reading::EnvironmentalReading;
pub use report::{render_json, render_text, AssessmentReport};
pub use risk::{assess, assess_detailed, DangerAssessment, DetailedAssessment};

use anyhow::Context;
use std::path::Path;

/// Inputs for a telemetry-driven assessment
pub struct StationOptions<'a> {
    pub base: i32,
    pub unrated_description: &'a str,
}

/// Assess a reading and wrap the result in a report
pub fn assess_reading(
    reading: &EnvironmentalReading,
    unrated_description: &str,
) -> anyhow::Result<AssessmentReport> {
    let detail = assess_detailed(reading, unrated_description)?;
    Ok(AssessmentReport::new(&detail, None))
}

/// Load upstream payloads from disk, convert them, and assess
pub fn assess_station_files(
    snow_path: &Path,
    weather_path: &Path,
    options: StationOptions<'_>,
) -> anyhow::Result<AssessmentReport> {
    let station = telemetry::load_station_report(snow_path)?;
    let weather = telemetry::load_weather_report(weather_path)?;

    let (reading, observation) = telemetry::build_reading(options.base, &station, &weather)?;
    let detail = assess_detailed(&reading, options.unrated_description)
        .with_context(|| format!("failed to assess conditions for {}", observation.region))?;

    Ok(AssessmentReport::new(&detail, Some(observation)))
}
