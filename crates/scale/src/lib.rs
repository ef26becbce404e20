//! Snellen/LogMAR visual-acuity scale model and conversion utilities.
//!
//! This crate holds the clinically standard visual-acuity charts and the
//! numeric conversion between their two notations:
//! - Snellen fractions (foot chart, e.g. `20/40`; metre chart, e.g. `6/12`)
//! - LogMAR (Logarithmic Minimum Angle of Resolution; lower is better)
//!
//! Responsibilities:
//! - Define the static, immutable scale tables per unit system
//! - Convert a discrete LogMAR value to its canonical fraction display
//! - Convert a Snellen ratio to LogMAR, including the optotypes-read
//!   correction term
//!
//! The tables are process-wide shared data; nothing in this crate mutates
//! them.

pub mod convert;
pub mod tables;

pub use convert::{snellen_to_log_mar, snellen_to_log_mar_with_correction, DEFAULT_OPTOTYPES_READ};
pub use tables::{scales_for, ScaleEntry, UnitSystem};

use std::str::FromStr;

/// Errors returned by scale lookups and conversions.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    /// The denominator of a Snellen fraction was zero.
    #[error("Snellen denominator cannot be zero")]
    InvalidDenominator,

    /// A LogMAR value had no exact match in the scale table.
    #[error("LogMAR value {0} not found in the {1} scale")]
    LogMarNotFound(f64, UnitSystem),

    /// A unit-system key was neither `foot` nor `metre`.
    #[error("unsupported unit system '{0}'")]
    UnsupportedUnit(String),
}

/// Type alias for Results that can fail with a [`ScaleError`].
pub type ScaleResult<T> = Result<T, ScaleError>;

/// Convert a discrete LogMAR value to its canonical Snellen fraction display.
///
/// The match is an exact equality comparison against the table's one-decimal
/// LogMAR values. Callers must supply one of the discrete chart values, not
/// an arbitrary continuous LogMAR; [`snellen_to_log_mar`] produces values on
/// that grid.
///
/// # Errors
///
/// Returns [`ScaleError::LogMarNotFound`] when no table entry carries the
/// exact value.
pub fn log_mar_to_display(log_mar: f64, unit: UnitSystem) -> ScaleResult<&'static str> {
    scales_for(unit)
        .iter()
        .find(|entry| entry.log_mar == log_mar)
        .map(|entry| entry.display)
        .ok_or(ScaleError::LogMarNotFound(log_mar, unit))
}

impl FromStr for UnitSystem {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foot" => Ok(UnitSystem::Foot),
            "metre" => Ok(UnitSystem::Metre),
            other => Err(ScaleError::UnsupportedUnit(other.to_string())),
        }
    }
}
