//! Avalanche CLI - avalanche danger assessment from weather and snowpack readings

#![deny(warnings)]

// Global invariants enforced:
// - Identical input yields byte-for-byte identical output
// - Any failure exits non-zero with the full error chain

use anyhow::Context;
use avalanche_core::config::{self, FormatPreference, ResolvedConfig};
use avalanche_core::report::{render_scale_json, render_scale_text};
use avalanche_core::{
    assess_reading, assess_station_files, render_json, render_text, AssessmentReport,
    EnvironmentalReading, StationOptions,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "avalanche")]
#[command(about = "Rule-based avalanche danger assessment from weather and snowpack readings")]
#[command(version = env!("AVALANCHE_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single set of readings given on the command line
    Assess {
        /// Base score 0-5 merged into the average (overrides config file)
        #[arg(long, allow_negative_numbers = true)]
        base: Option<i32>,

        /// Air temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Wind speed in km/h
        #[arg(long)]
        wind: f64,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: f64,

        /// Barometric pressure in hPa
        #[arg(long)]
        pressure: f64,

        /// Precipitation in mm
        #[arg(long)]
        precip: f64,

        /// Snow-water-equivalent in mm
        #[arg(long)]
        swe: f64,

        /// Snow depth in cm
        #[arg(long)]
        depth: f64,

        /// Output format (overrides config file)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Assess from snow-station and current-weather JSON payloads
    Station {
        /// Snow-station report (SWE and depth in inches)
        #[arg(long)]
        snow: PathBuf,

        /// Current-weather report
        #[arg(long)]
        weather: PathBuf,

        /// Base score 0-5 merged into the average (overrides config file)
        #[arg(long, allow_negative_numbers = true)]
        base: Option<i32>,

        /// Output format (overrides config file)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the avalanche danger scale
    Scale {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or inspect configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an assessment
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the resolved configuration
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<FormatPreference> for OutputFormat {
    fn from(pref: FormatPreference) -> Self {
        match pref {
            FormatPreference::Text => OutputFormat::Text,
            FormatPreference::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("AVALANCHE_LOG", "warn"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            base,
            temp,
            wind,
            humidity,
            pressure,
            precip,
            swe,
            depth,
            format,
            config,
        } => {
            let resolved = load_config(config.as_deref())?;
            let reading = EnvironmentalReading {
                base: resolved.base_or(base)?,
                temperature_c: temp,
                wind_speed_kph: wind,
                humidity_pct: humidity,
                pressure_hpa: pressure,
                precipitation_mm: precip,
                snow_water_equivalent_mm: swe,
                snow_depth_cm: depth,
            };

            let report = assess_reading(&reading, &resolved.unrated_description)?;
            print_report(&report, format.unwrap_or_else(|| resolved.format.into()));
        }
        Commands::Station {
            snow,
            weather,
            base,
            format,
            config,
        } => {
            let resolved = load_config(config.as_deref())?;
            let options = StationOptions {
                base: resolved.base_or(base)?,
                unrated_description: &resolved.unrated_description,
            };

            let report = assess_station_files(&snow, &weather, options)
                .context("station assessment failed")?;
            print_report(&report, format.unwrap_or_else(|| resolved.format.into()));
        }
        Commands::Scale { format } => match format {
            OutputFormat::Text => print!("{}", render_scale_text()),
            OutputFormat::Json => println!("{}", render_scale_json()),
        },
        Commands::Config { action } => handle_config(action)?,
    }

    Ok(())
}

/// Resolve config from an explicit path or the current directory
fn load_config(path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, path)?;
    if let Some(ref config_path) = resolved.config_path {
        eprintln!("Using config: {}", config_path.display());
    }
    Ok(resolved)
}

fn print_report(report: &AssessmentReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(report)),
        OutputFormat::Json => println!("{}", render_json(report)),
    }
}

fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Validate { path } => {
            let cwd = std::env::current_dir()?;
            let found = match path {
                Some(p) => Some((config::load_config_file(&p)?, p)),
                None => config::discover_config(&cwd)?,
            };

            match found {
                Some((parsed, p)) => {
                    parsed
                        .resolve()
                        .with_context(|| format!("invalid config in: {}", p.display()))?;
                    println!("Config valid: {}", p.display());
                }
                None => println!("No config file found, using defaults"),
            }
        }
        ConfigAction::Show { path } => {
            let resolved = load_config(path.as_deref())?;
            print!("{}", render_resolved_config(&resolved)?);
        }
    }

    Ok(())
}

/// Render resolved settings, marking values left at their defaults
fn render_resolved_config(resolved: &ResolvedConfig) -> anyhow::Result<String> {
    let defaults = ResolvedConfig::defaults()?;
    let source = resolved
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let mut out = String::new();
    out.push_str(&format!("source: {}\n", source));
    out.push_str(&format!(
        "base: {}{}\n",
        resolved.base,
        marker(resolved.base == defaults.base)
    ));
    out.push_str(&format!(
        "unrated_description: {}{}\n",
        resolved.unrated_description,
        marker(resolved.unrated_description == defaults.unrated_description)
    ));
    out.push_str(&format!(
        "format: {:?}{}\n",
        resolved.format,
        marker(resolved.format == defaults.format)
    ));
    Ok(out)
}

fn marker(is_default: bool) -> &'static str {
    if is_default {
        " (default)"
    } else {
        ""
    }
}
