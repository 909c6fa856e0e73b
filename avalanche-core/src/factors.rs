//! Per-factor risk classifiers
//!
//! Global invariants enforced:
//! - Every classifier is pure and total over the finite reals
//! - Scores are bounded to 0..=4
//! - Comparison operators are exact per ladder; neighbouring bands do not
//!   always agree on which side owns a boundary

use crate::reading::EnvironmentalReading;
use serde::{Deserialize, Serialize};

/// Risk contribution of a single environmental variable
pub type FactorScore = u8;

/// Temperature (°C): colder snowpack scores higher
pub fn temperature_risk(temp_c: f64) -> FactorScore {
    if temp_c < -20.0 {
        4
    } else if temp_c < -10.0 {
        3
    } else if temp_c < 0.0 {
        2
    } else if temp_c < 5.0 {
        1
    } else {
        0
    }
}

/// Wind speed (km/h): 70 itself is still the strong-wind band
pub fn wind_speed_risk(wind_kph: f64) -> FactorScore {
    if wind_kph > 70.0 {
        4
    } else if wind_kph >= 50.0 {
        3
    } else if wind_kph >= 30.0 {
        2
    } else if wind_kph >= 10.0 {
        1
    } else {
        0
    }
}

/// Relative humidity (%), capped at 2
pub fn humidity_risk(humidity_pct: f64) -> FactorScore {
    if humidity_pct > 90.0 {
        2
    } else if humidity_pct >= 70.0 {
        1
    } else {
        0
    }
}

/// Barometric pressure (hPa): falling pressure scores higher
pub fn pressure_risk(pressure_hpa: f64) -> FactorScore {
    if pressure_hpa < 1000.0 {
        4
    } else if pressure_hpa < 1010.0 {
        3
    } else if pressure_hpa < 1020.0 {
        2
    } else if pressure_hpa < 1030.0 {
        1
    } else {
        0
    }
}

/// Precipitation (mm). Floor is 1, dry conditions still contribute.
pub fn precipitation_risk(precip_mm: f64) -> FactorScore {
    if precip_mm > 20.0 {
        4
    } else if precip_mm >= 10.0 {
        3
    } else if precip_mm >= 5.0 {
        2
    } else {
        1
    }
}

/// Snow-water-equivalent (mm). Floor is 1.
pub fn snow_water_equivalent_risk(swe_mm: f64) -> FactorScore {
    if swe_mm > 500.0 {
        4
    } else if swe_mm >= 250.0 {
        3
    } else if swe_mm >= 100.0 {
        2
    } else {
        1
    }
}

/// Snow depth (cm). Floor is 1.
pub fn snow_depth_risk(depth_cm: f64) -> FactorScore {
    if depth_cm > 200.0 {
        4
    } else if depth_cm >= 100.0 {
        3
    } else if depth_cm >= 50.0 {
        2
    } else {
        1
    }
}

/// The seven classified dimensions, in aggregation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    WindSpeed,
    Humidity,
    Pressure,
    Precipitation,
    SnowWaterEquivalent,
    SnowDepth,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Temperature,
        Factor::WindSpeed,
        Factor::Humidity,
        Factor::Pressure,
        Factor::Precipitation,
        Factor::SnowWaterEquivalent,
        Factor::SnowDepth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Temperature => "temperature",
            Factor::WindSpeed => "wind_speed",
            Factor::Humidity => "humidity",
            Factor::Pressure => "pressure",
            Factor::Precipitation => "precipitation",
            Factor::SnowWaterEquivalent => "snow_water_equivalent",
            Factor::SnowDepth => "snow_depth",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Factor::Temperature => "°C",
            Factor::WindSpeed => "km/h",
            Factor::Humidity => "%",
            Factor::Pressure => "hPa",
            Factor::Precipitation => "mm",
            Factor::SnowWaterEquivalent => "mm",
            Factor::SnowDepth => "cm",
        }
    }

    /// Classify a raw value with this factor's ladder
    pub fn classify(&self, value: f64) -> FactorScore {
        match self {
            Factor::Temperature => temperature_risk(value),
            Factor::WindSpeed => wind_speed_risk(value),
            Factor::Humidity => humidity_risk(value),
            Factor::Pressure => pressure_risk(value),
            Factor::Precipitation => precipitation_risk(value),
            Factor::SnowWaterEquivalent => snow_water_equivalent_risk(value),
            Factor::SnowDepth => snow_depth_risk(value),
        }
    }

    /// Pull this factor's raw value out of a reading
    pub fn value_of(&self, reading: &EnvironmentalReading) -> f64 {
        match self {
            Factor::Temperature => reading.temperature_c,
            Factor::WindSpeed => reading.wind_speed_kph,
            Factor::Humidity => reading.humidity_pct,
            Factor::Pressure => reading.pressure_hpa,
            Factor::Precipitation => reading.precipitation_mm,
            Factor::SnowWaterEquivalent => reading.snow_water_equivalent_mm,
            Factor::SnowDepth => reading.snow_depth_cm,
        }
    }
}

/// Scores for all seven factors of one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FactorScores {
    pub temperature: FactorScore,
    pub wind_speed: FactorScore,
    pub humidity: FactorScore,
    pub pressure: FactorScore,
    pub precipitation: FactorScore,
    pub snow_water_equivalent: FactorScore,
    pub snow_depth: FactorScore,
}

impl FactorScores {
    /// Classify every factor of a reading
    pub fn classify(reading: &EnvironmentalReading) -> Self {
        let score = |factor: Factor| factor.classify(factor.value_of(reading));
        FactorScores {
            temperature: score(Factor::Temperature),
            wind_speed: score(Factor::WindSpeed),
            humidity: score(Factor::Humidity),
            pressure: score(Factor::Pressure),
            precipitation: score(Factor::Precipitation),
            snow_water_equivalent: score(Factor::SnowWaterEquivalent),
            snow_depth: score(Factor::SnowDepth),
        }
    }

    /// Scores in [`Factor::ALL`] order
    pub fn as_array(&self) -> [FactorScore; 7] {
        [
            self.temperature,
            self.wind_speed,
            self.humidity,
            self.pressure,
            self.precipitation,
            self.snow_water_equivalent,
            self.snow_depth,
        ]
    }

    pub fn get(&self, factor: Factor) -> FactorScore {
        match factor {
            Factor::Temperature => self.temperature,
            Factor::WindSpeed => self.wind_speed,
            Factor::Humidity => self.humidity,
            Factor::Pressure => self.pressure,
            Factor::Precipitation => self.precipitation,
            Factor::SnowWaterEquivalent => self.snow_water_equivalent,
            Factor::SnowDepth => self.snow_depth,
        }
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().map(|&s| u32::from(s)).sum()
    }
}
