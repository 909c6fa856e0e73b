//! Typed errors for the assessment core
//!
//! The core never panics and never coerces bad input. Everything above the
//! core (telemetry, config, CLI) works in `anyhow::Result` and converts these
//! through `?`.

use thiserror::Error;

/// Errors returned by the danger aggregator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// A reading field was NaN or infinite
    #[error("invalid input: {field} must be a finite number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
}
