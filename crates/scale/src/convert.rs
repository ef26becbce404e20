//! Snellen ratio to LogMAR conversion.
//!
//! `LogMAR = log10(denominator / numerator) − optotypes_read × 0.02`, rounded
//! half-away-from-zero to one decimal place. Each optotype read beyond the
//! best fully-read line refines the score by 0.02; a reading taken exactly on
//! a chart line conventionally carries a count of −2, which is the default
//! here.
//!
//! The rounding rule is calibrated so that converting every chart line's own
//! ratio reproduces that line's tabulated LogMAR exactly, keeping the result
//! usable for the exact-match display lookups elsewhere in the workspace.

use crate::{ScaleError, ScaleResult};

/// Default optotypes-read count applied by [`snellen_to_log_mar`].
pub const DEFAULT_OPTOTYPES_READ: i32 = -2;

/// Weight of one optotype in LogMAR.
const OPTOTYPE_STEP: f64 = 0.02;

/// Convert a Snellen ratio to LogMAR using the default optotypes-read count.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidDenominator`] when `denominator` is zero.
pub fn snellen_to_log_mar(numerator: f64, denominator: f64) -> ScaleResult<f64> {
    snellen_to_log_mar_with_correction(numerator, denominator, DEFAULT_OPTOTYPES_READ)
}

/// Convert a Snellen ratio to LogMAR with an explicit optotypes-read count.
///
/// `optotypes_read` is the number of optotypes read beyond the best
/// fully-read line; negative counts worsen the score. Only the denominator
/// is validated.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidDenominator`] when `denominator` is zero.
pub fn snellen_to_log_mar_with_correction(
    numerator: f64,
    denominator: f64,
    optotypes_read: i32,
) -> ScaleResult<f64> {
    if denominator == 0.0 {
        return Err(ScaleError::InvalidDenominator);
    }

    let raw = (denominator / numerator).log10() - f64::from(optotypes_read) * OPTOTYPE_STEP;
    Ok(round_to_one_decimal(raw))
}

/// Round half away from zero at the first decimal digit.
///
/// `f64::round` is half-away-from-zero, and `n / 10.0` for integral `n`
/// yields the same representation as the one-decimal table literals, so the
/// result compares equal to table values with `==`.
fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scales_for, UnitSystem};
    use pretty_assertions::assert_eq;

    #[test]
    fn worked_reference_case() {
        // log10(40/20) = 0.30103, +0.04 correction = 0.34103, rounds to 0.3.
        assert_eq!(snellen_to_log_mar(20.0, 40.0).unwrap(), 0.3);
    }

    #[test]
    fn reproduces_every_chart_line() {
        for unit in [UnitSystem::Foot, UnitSystem::Metre] {
            for entry in scales_for(unit) {
                let log_mar = snellen_to_log_mar(entry.numerator, entry.denominator)
                    .expect("chart ratios convert");
                assert_eq!(log_mar, entry.log_mar, "chart line {}", entry.display);
            }
        }
    }

    #[test]
    fn rejects_zero_denominator() {
        for numerator in [20.0, 6.0, 0.0, -1.0] {
            let err = snellen_to_log_mar(numerator, 0.0).expect_err("zero denominator");
            assert!(matches!(err, ScaleError::InvalidDenominator));
        }
    }

    #[test]
    fn default_correction_matches_explicit_minus_two() {
        assert_eq!(
            snellen_to_log_mar(20.0, 63.0).unwrap(),
            snellen_to_log_mar_with_correction(20.0, 63.0, -2).unwrap()
        );
    }

    #[test]
    fn zero_correction_drops_the_offset() {
        // log10(2) = 0.30103 with no correction still rounds to 0.3,
        // log10(200/20) = 1.0 exactly.
        assert_eq!(
            snellen_to_log_mar_with_correction(20.0, 40.0, 0).unwrap(),
            0.3
        );
        assert_eq!(
            snellen_to_log_mar_with_correction(20.0, 200.0, 0).unwrap(),
            1.0
        );
    }

    #[test]
    fn positive_optotype_counts_improve_the_score() {
        // log10(2) − 5×0.02 = 0.20103, rounds to 0.2.
        assert_eq!(
            snellen_to_log_mar_with_correction(20.0, 40.0, 5).unwrap(),
            0.2
        );
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 20/16 lands at −0.0569, which must round to −0.1 on the chart grid
        // only after the ×10 scaling; check both signs around a .5 boundary.
        assert_eq!(snellen_to_log_mar(20.0, 16.0).unwrap(), -0.1);
        assert_eq!(round_to_one_decimal(0.25), 0.3);
        assert_eq!(round_to_one_decimal(-0.25), -0.3);
    }
}
