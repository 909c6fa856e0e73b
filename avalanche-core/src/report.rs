//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Factor rows always appear in aggregation order
//! - Byte-for-byte identical output across runs

use crate::factors::{Factor, FactorScore, FactorScores};
use crate::reading::EnvironmentalReading;
use crate::risk::DetailedAssessment;
use crate::scale;
use crate::telemetry::ObservationContext;
use serde::{Deserialize, Serialize};

/// One classified factor in report form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FactorReport {
    pub factor: Factor,
    pub value: f64,
    pub unit: String,
    pub score: FactorScore,
}

/// Complete assessment report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AssessmentReport {
    pub danger_level: u8,
    pub label: String,
    pub description: String,
    pub base: i32,
    pub factors: Vec<FactorReport>,
    pub mean: f64,
    pub raw_danger: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<ObservationContext>,
}

impl AssessmentReport {
    pub fn new(detail: &DetailedAssessment, observation: Option<ObservationContext>) -> Self {
        AssessmentReport {
            danger_level: detail.assessment.danger_level,
            label: scale::label(detail.assessment.danger_level).to_string(),
            description: detail.assessment.description.clone(),
            base: detail.reading.base,
            factors: factor_rows(&detail.reading, &detail.scores),
            mean: detail.mean,
            raw_danger: detail.raw_danger,
            observation,
        }
    }
}

fn factor_rows(reading: &EnvironmentalReading, scores: &FactorScores) -> Vec<FactorReport> {
    Factor::ALL
        .iter()
        .map(|factor| FactorReport {
            factor: *factor,
            value: factor.value_of(reading),
            unit: factor.unit().to_string(),
            score: scores.get(*factor),
        })
        .collect()
}

/// Render a report as text output
pub fn render_text(report: &AssessmentReport) -> String {
    let mut output = String::new();

    if let Some(ref obs) = report.observation {
        output.push_str(&format!("Region: {}\n", obs.region));
        match obs.station {
            Some(ref station) => {
                output.push_str(&format!("Observed: {} (station {})\n", obs.date, station))
            }
            None => output.push_str(&format!("Observed: {}\n", obs.date)),
        }
        output.push('\n');

        if !obs.station_rows.is_empty() {
            output.push_str(&format!(
                "{:<12} {:>10} {:>12}\n",
                "DATE", "SWE (in)", "DEPTH (in)"
            ));
            for row in &obs.station_rows {
                output.push_str(&format!(
                    "{:<12} {:>10.2} {:>12.2}\n",
                    row.date, row.snow_water_equivalent_in, row.snow_depth_in
                ));
            }
            output.push('\n');
        }
    }

    output.push_str(&format!(
        "{:<24} {:>12} {:<6} {}\n",
        "FACTOR", "VALUE", "UNIT", "SCORE"
    ));
    output.push_str(&format!(
        "{:<24} {:>12} {:<6} {}\n",
        "base", report.base, "-", report.base
    ));
    for row in &report.factors {
        output.push_str(&format!(
            "{:<24} {:>12.2} {:<6} {}\n",
            row.factor.as_str(),
            row.value,
            row.unit,
            row.score
        ));
    }

    output.push('\n');
    output.push_str(&format!("Mean score:   {:.3}\n", report.mean));
    output.push_str(&format!(
        "Danger level: {} ({})\n",
        report.danger_level, report.label
    ));
    output.push_str(&format!("{}\n", report.description));

    output
}

/// Render a report as JSON output
pub fn render_json(report: &AssessmentReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Render the danger scale as text
pub fn render_scale_text() -> String {
    let mut output = format!("{:<6} {:<13} {}\n", "LEVEL", "LABEL", "DESCRIPTION");
    for (level, description) in scale::DANGER_SCALE {
        output.push_str(&format!(
            "{:<6} {:<13} {}\n",
            level,
            scale::label(level),
            description
        ));
    }
    output
}

#[derive(Serialize)]
struct ScaleEntry {
    level: u8,
    label: &'static str,
    description: &'static str,
}

/// Render the danger scale as JSON
pub fn render_scale_json() -> String {
    let entries: Vec<ScaleEntry> = scale::DANGER_SCALE
        .iter()
        .map(|&(level, description)| ScaleEntry {
            level,
            label: scale::label(level),
            description,
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::assess_detailed;
    use crate::scale::UNRATED_DESCRIPTION;
    use crate::telemetry::StationRow;

    fn storm_detail() -> DetailedAssessment {
        let reading = EnvironmentalReading {
            base: 5,
            temperature_c: -25.0,
            wind_speed_kph: 80.0,
            humidity_pct: 95.0,
            pressure_hpa: 995.0,
            precipitation_mm: 25.0,
            snow_water_equivalent_mm: 600.0,
            snow_depth_cm: 250.0,
        };
        assess_detailed(&reading, UNRATED_DESCRIPTION).unwrap()
    }

    #[test]
    fn test_report_rows_follow_aggregation_order() {
        let report = AssessmentReport::new(&storm_detail(), None);
        let order: Vec<Factor> = report.factors.iter().map(|r| r.factor).collect();
        assert_eq!(order, Factor::ALL.to_vec());
        assert_eq!(report.label, "high");
        assert_eq!(report.raw_danger, 4);
    }

    #[test]
    fn test_render_text_contains_level_and_description() {
        let report = AssessmentReport::new(&storm_detail(), None);
        let text = render_text(&report);
        assert!(text.contains("Danger level: 4 (high)"));
        assert!(text.contains("High - Very dangerous avalanche conditions"));
        assert!(text.contains("snow_water_equivalent"));
        assert!(!text.contains("Region:"));
    }

    #[test]
    fn test_render_text_includes_observation() {
        let observation = ObservationContext {
            region: "Jammu and Kashmir".to_string(),
            date: "2024-01-15".to_string(),
            station: None,
            station_rows: Vec::new(),
        };
        let report = AssessmentReport::new(&storm_detail(), Some(observation));
        let text = render_text(&report);
        assert!(text.starts_with("Region: Jammu and Kashmir\nObserved: 2024-01-15\n\nFACTOR"));
    }

    #[test]
    fn test_render_station_rows_in_text_and_json() {
        let observation = ObservationContext {
            region: "Jammu and Kashmir".to_string(),
            date: "2024-01-15".to_string(),
            station: Some("1101:JK:SNTL".to_string()),
            station_rows: vec![
                StationRow {
                    date: "2024-01-14".to_string(),
                    snow_water_equivalent_in: 22.1,
                    snow_depth_in: 88.0,
                },
                StationRow {
                    date: "2024-01-15".to_string(),
                    snow_water_equivalent_in: 24.0,
                    snow_depth_in: 95.0,
                },
            ],
        };
        let report = AssessmentReport::new(&storm_detail(), Some(observation));

        let text = render_text(&report);
        assert!(text.contains("2024-01-14        22.10        88.00\n"));
        assert!(text.contains("2024-01-15        24.00        95.00\n"));

        let value: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();
        let rows = &value["observation"]["station_rows"];
        assert_eq!(rows.as_array().unwrap().len(), 2);
        assert_eq!(rows[0]["date"], "2024-01-14");
        assert_eq!(rows[0]["snow_water_equivalent_in"], 22.1);
        assert_eq!(rows[1]["snow_depth_in"], 95.0);
    }

    #[test]
    fn test_render_json_is_deterministic() {
        let report = AssessmentReport::new(&storm_detail(), None);
        let first = render_json(&report);
        let second = render_json(&AssessmentReport::new(&storm_detail(), None));
        assert_eq!(first, second);

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["danger_level"], 4);
        assert_eq!(value["factors"][1]["factor"], "wind_speed");
        assert!(value.get("observation").is_none());
    }

    #[test]
    fn test_render_scale_lists_five_levels() {
        let text = render_scale_text();
        assert_eq!(text.lines().count(), 6);
        let json: serde_json::Value = serde_json::from_str(&render_scale_json()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[4]["label"], "extreme");
    }
}
