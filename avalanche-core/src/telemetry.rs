//! Upstream telemetry payloads
//!
//! Parses the snow-station and current-weather JSON documents and turns them
//! into an [`EnvironmentalReading`]. Unit conversion happens here so the
//! core only ever sees millimetres, centimetres, °C, km/h and hPa.
//!
//! Fetching the payloads is the caller's concern; this module only reads
//! JSON that has already been retrieved.

use crate::reading::EnvironmentalReading;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MM_PER_INCH: f64 = 25.4;
pub const CM_PER_INCH: f64 = 2.54;

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// A station measurement, sent either as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    pub fn value(&self) -> Result<f64> {
        match self {
            Measurement::Number(n) => Ok(*n),
            Measurement::Text(s) => s
                .trim()
                .parse::<f64>()
                .with_context(|| format!("non-numeric measurement: {:?}", s)),
        }
    }
}

/// Station metadata (only the triplet is of interest)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationInformation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub triplet: Option<String>,
}

/// One daily row of a station report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Snow Water Equivalent (in)")]
    pub snow_water_equivalent_in: Measurement,
    #[serde(rename = "Snow Depth (in)")]
    pub snow_depth_in: Measurement,
}

/// Snow-station report for a single station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    #[serde(default)]
    pub station_information: Option<StationInformation>,
    pub data: Vec<StationEntry>,
}

impl StationReport {
    /// Every row as reported, oldest first, measurements still in inches
    pub fn rows(&self) -> Result<Vec<StationRow>> {
        self.data.iter().map(StationRow::from_entry).collect()
    }
}

/// A station row with its measurements parsed, kept in the upstream unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StationRow {
    pub date: String,
    pub snow_water_equivalent_in: f64,
    pub snow_depth_in: f64,
}

impl StationRow {
    fn from_entry(entry: &StationEntry) -> Result<Self> {
        Ok(StationRow {
            date: entry.date.clone(),
            snow_water_equivalent_in: entry
                .snow_water_equivalent_in
                .value()
                .with_context(|| format!("invalid snow water equivalent for {}", entry.date))?,
            snow_depth_in: entry
                .snow_depth_in
                .value()
                .with_context(|| format!("invalid snow depth for {}", entry.date))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    #[serde(default)]
    pub name: Option<String>,
    pub region: String,
}

/// Current conditions block of a weather report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub wind_kph: f64,
    pub humidity: f64,
    pub pressure_mb: f64,
    pub precip_mm: f64,
}

/// Current-weather report for a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: WeatherLocation,
    pub current: CurrentConditions,
}

/// Where a reading came from, carried through to the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ObservationContext {
    pub region: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Station rows as returned upstream, so day-over-day change stays visible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub station_rows: Vec<StationRow>,
}

pub fn parse_station_report(json: &str) -> Result<StationReport> {
    serde_json::from_str(json).context("failed to parse station report")
}

pub fn parse_weather_report(json: &str) -> Result<WeatherReport> {
    serde_json::from_str(json).context("failed to parse weather report")
}

pub fn load_station_report(path: &Path) -> Result<StationReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read station report: {}", path.display()))?;
    parse_station_report(&content).with_context(|| format!("in {}", path.display()))
}

pub fn load_weather_report(path: &Path) -> Result<WeatherReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read weather report: {}", path.display()))?;
    parse_weather_report(&content).with_context(|| format!("in {}", path.display()))
}

/// Build a reading from the latest station row and current weather
///
/// SWE and depth arrive in inches and are converted to mm and cm. Every
/// station row is kept in the context, unconverted.
pub fn build_reading(
    base: i32,
    station: &StationReport,
    weather: &WeatherReport,
) -> Result<(EnvironmentalReading, ObservationContext)> {
    let rows = station.rows()?;
    let latest = rows
        .last()
        .ok_or_else(|| anyhow::anyhow!("station report contains no data rows"))?;
    let date = latest.date.clone();
    let swe_in = latest.snow_water_equivalent_in;
    let depth_in = latest.snow_depth_in;

    let current = &weather.current;
    let reading = EnvironmentalReading {
        base,
        temperature_c: current.temp_c,
        wind_speed_kph: current.wind_kph,
        humidity_pct: current.humidity,
        pressure_hpa: current.pressure_mb,
        precipitation_mm: current.precip_mm,
        snow_water_equivalent_mm: inches_to_mm(swe_in),
        snow_depth_cm: inches_to_cm(depth_in),
    };

    log::debug!(
        "station row {}: swe {} in -> {:.1} mm, depth {} in -> {:.1} cm",
        date,
        swe_in,
        reading.snow_water_equivalent_mm,
        depth_in,
        reading.snow_depth_cm
    );

    let context = ObservationContext {
        region: weather.location.region.clone(),
        date,
        station: station
            .station_information
            .as_ref()
            .and_then(|info| info.triplet.clone()),
        station_rows: rows,
    };

    Ok((reading, context))
}
