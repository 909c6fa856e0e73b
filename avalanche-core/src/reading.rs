//! Environmental readings fed into the aggregator
//!
//! Units are fixed at this boundary: conversion from upstream units happens
//! in [`crate::telemetry`] before a reading is built.

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};

/// The eight scalar inputs of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EnvironmentalReading {
    /// Caller-assigned seed score merged into the average
    pub base: i32,
    pub temperature_c: f64,
    pub wind_speed_kph: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub precipitation_mm: f64,
    pub snow_water_equivalent_mm: f64,
    pub snow_depth_cm: f64,
}

impl EnvironmentalReading {
    /// Floating fields in aggregation order, paired with their names
    pub fn measurements(&self) -> [(&'static str, f64); 7] {
        [
            ("temperature_c", self.temperature_c),
            ("wind_speed_kph", self.wind_speed_kph),
            ("humidity_pct", self.humidity_pct),
            ("pressure_hpa", self.pressure_hpa),
            ("precipitation_mm", self.precipitation_mm),
            ("snow_water_equivalent_mm", self.snow_water_equivalent_mm),
            ("snow_depth_cm", self.snow_depth_cm),
        ]
    }

    /// Reject NaN and infinite values
    ///
    /// Reports the first offending field in aggregation order. Ranges are not
    /// checked: every classifier is total over the finite reals.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        for (field, value) in self.measurements() {
            if !value.is_finite() {
                return Err(AssessmentError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> EnvironmentalReading {
        EnvironmentalReading {
            base: 0,
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
    fn test_validate_accepts_finite_values() {
        assert!(calm().validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_out_of_range_but_finite() {
        let reading = EnvironmentalReading {
            humidity_pct: 140.0,
            wind_speed_kph: -3.0,
            ..calm()
        };
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let reading = EnvironmentalReading {
            pressure_hpa: f64::NAN,
            ..calm()
        };
        match reading.validate() {
            Err(AssessmentError::InvalidInput { field, value }) => {
                assert_eq!(field, "pressure_hpa");
                assert!(value.is_nan());
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_infinity() {
        let reading = EnvironmentalReading {
            snow_depth_cm: f64::INFINITY,
            ..calm()
        };
        assert_eq!(
            reading.validate(),
            Err(AssessmentError::InvalidInput {
                field: "snow_depth_cm",
                value: f64::INFINITY,
            })
        );
    }

    #[test]
    fn test_validate_reports_first_bad_field() {
        let reading = EnvironmentalReading {
            temperature_c: f64::NEG_INFINITY,
            snow_depth_cm: f64::NAN,
            ..calm()
        };
        let err = reading.validate().unwrap_err();
        assert!(err.to_string().contains("temperature_c"));
    }
}
