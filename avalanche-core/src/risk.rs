//! Composite avalanche danger calculation
//!
//! Global invariants enforced:
//! - Deterministic, stateless aggregation
//! - Inputs are validated before classification
//! - Rounding is applied to the mean before the modulo
//! - Danger level is always in 0..=4

use crate::error::AssessmentError;
use crate::factors::FactorScores;
use crate::reading::EnvironmentalReading;
use crate::scale::{self, UNRATED_DESCRIPTION};
use serde::{Deserialize, Serialize};

/// Number of values averaged: base plus seven factor scores
pub const AGGREGATED_VALUES: usize = 8;

/// Number of distinct danger levels the modulo folds into
const LEVEL_MODULUS: i64 = 5;

/// Final result of an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DangerAssessment {
    pub danger_level: u8,
    pub description: String,
}

impl DangerAssessment {
    /// Whether the level has an entry in the danger scale
    pub fn is_rated(&self) -> bool {
        scale::describe(self.danger_level).is_some()
    }
}

/// Assessment plus the intermediate values that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedAssessment {
    pub reading: EnvironmentalReading,
    pub scores: FactorScores,
    /// Arithmetic mean of base and the seven factor scores
    pub mean: f64,
    /// Mean rounded half-up, before folding into the scale
    pub raw_danger: i64,
    pub assessment: DangerAssessment,
}

/// Round half up (toward positive infinity on ties)
///
/// The mean is always a multiple of 1/8, so adding 0.5 is exact.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Fold a rounded mean into 0..=4
///
/// Euclidean remainder keeps the result non-negative for a negative base.
pub fn fold_danger(raw_danger: i64) -> u8 {
    raw_danger.rem_euclid(LEVEL_MODULUS) as u8
}

/// Mean of base and factor scores, in aggregation order
pub fn mean_score(base: i32, scores: &FactorScores) -> f64 {
    let sum = i64::from(base) + i64::from(scores.total());
    sum as f64 / AGGREGATED_VALUES as f64
}

/// Assess with the default level-0 description
pub fn assess(reading: &EnvironmentalReading) -> Result<DangerAssessment, AssessmentError> {
    assess_detailed(reading, UNRATED_DESCRIPTION).map(|detail| detail.assessment)
}

/// Assess and keep every intermediate value
///
/// `unrated_description` fills in the description for level 0, which has no
/// danger scale entry.
pub fn assess_detailed(
    reading: &EnvironmentalReading,
    unrated_description: &str,
) -> Result<DetailedAssessment, AssessmentError> {
    reading.validate()?;

    let scores = FactorScores::classify(reading);
    let mean = mean_score(reading.base, &scores);
    let raw_danger = round_half_up(mean);
    let danger_level = fold_danger(raw_danger);

    let description = match scale::describe(danger_level) {
        Some(text) => text.to_string(),
        None => {
            log::debug!(
                "danger level {} has no scale entry, using unrated description",
                danger_level
            );
            unrated_description.to_string()
        }
    };

    log::debug!(
        "base={} scores={:?} mean={:.3} raw={} level={}",
        reading.base,
        scores.as_array(),
        mean,
        raw_danger,
        danger_level
    );

    Ok(DetailedAssessment {
        reading: *reading,
        scores,
        mean,
        raw_danger,
        assessment: DangerAssessment {
            danger_level,
            description,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(base: i32) -> EnvironmentalReading {
        EnvironmentalReading {
            base,
            temperature_c: 10.0,
            wind_speed_kph: 5.0,
            humidity_pct: 50.0,
            pressure_hpa: 1035.0,
            precipitation_mm: 0.0,
            snow_water_equivalent_mm: 50.0,
            snow_depth_cm: 20.0,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.375), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(4.125), 4);
        assert_eq!(round_half_up(4.5), 5);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.625), -1);
    }

    #[test]
    fn test_fold_danger_wraps_five_to_zero() {
        assert_eq!(fold_danger(4), 4);
        assert_eq!(fold_danger(5), 0);
        assert_eq!(fold_danger(6), 1);
        assert_eq!(fold_danger(-1), 4);
    }

    #[test]
    fn test_mean_includes_base() {
        // Calm reading scores 0,0,0,0,1,1,1
        let scores = FactorScores::classify(&reading(0));
        assert_eq!(mean_score(0, &scores), 0.375);
        assert_eq!(mean_score(5, &scores), 1.0);
    }

    #[test]
    fn test_assess_calm_is_unrated() {
        let result = assess(&reading(0)).unwrap();
        assert_eq!(result.danger_level, 0);
        assert_eq!(result.description, UNRATED_DESCRIPTION);
        assert!(!result.is_rated());
    }

    #[test]
    fn test_assess_detailed_uses_custom_unrated_text() {
        let detail = assess_detailed(&reading(0), "No rating").unwrap();
        assert_eq!(detail.assessment.description, "No rating");
        assert_eq!(detail.raw_danger, 0);
    }

    #[test]
    fn test_base_five_lifts_calm_reading_to_low() {
        let result = assess(&reading(5)).unwrap();
        assert_eq!(result.danger_level, 1);
        assert_eq!(result.description, scale::describe(1).unwrap());
        assert!(result.is_rated());
    }

    #[test]
    fn test_assess_rejects_non_finite_before_classifying() {
        let bad = EnvironmentalReading {
            humidity_pct: f64::NAN,
            ..reading(0)
        };
        assert!(matches!(
            assess(&bad),
            Err(AssessmentError::InvalidInput { field: "humidity_pct", .. })
        ));
    }

    #[test]
    fn test_negative_base_stays_in_range() {
        let result = assess(&reading(-40)).unwrap();
        // mean = (-40 + 3) / 8 = -4.625 -> -5 -> 0
        assert_eq!(result.danger_level, 0);
    }
}
