//! Fixed-point evaluation scores.
//!
//! Scores are decimals in `[0.0, 10.0]` with one decimal of precision.
//! Internally they are whole tenths (an `i16`), so summing across a project's
//! evaluations is integer arithmetic with no floating-point drift.

use serde::Serialize;

use crate::error::CoreError;

/// Lowest accepted score.
pub const SCORE_MIN: f64 = 0.0;

/// Highest accepted score.
pub const SCORE_MAX: f64 = 10.0;

/// An evaluation score stored as whole tenths (e.g. `8.5` -> `85`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(i16);

impl Score {
    /// Parse a raw number into a score.
    ///
    /// Rejects non-finite values, values outside `[0, 10]`, and values with
    /// more than one decimal of precision.
    pub fn try_from_f64(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::InvalidScore(
                "Score must be a finite number".to_string(),
            ));
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(CoreError::InvalidScore(format!(
                "Score must be between {SCORE_MIN} and {SCORE_MAX}, got {value}"
            )));
        }

        let scaled = value * 10.0;
        if (scaled - scaled.round()).abs() > 1e-9 {
            return Err(CoreError::InvalidScore(format!(
                "Score must have at most one decimal place, got {value}"
            )));
        }

        Ok(Score(scaled.round() as i16))
    }

    /// Reconstruct a score from stored tenths. The database constraint keeps
    /// the column within range, so this is infallible at the trust boundary.
    pub fn from_tenths(tenths: i16) -> Self {
        Score(tenths)
    }

    pub fn tenths(self) -> i16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Serialize for Score {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Sum score tenths without precision loss. Three scores of 10.0 stay well
/// inside `i64`.
pub fn total_tenths<I: IntoIterator<Item = i16>>(tenths: I) -> i64 {
    tenths.into_iter().map(i64::from).sum()
}

/// Render a tenths total as a decimal for API responses.
pub fn tenths_as_f64(tenths: i64) -> f64 {
    tenths as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scores_accepted() {
        assert_eq!(Score::try_from_f64(0.0).unwrap().tenths(), 0);
        assert_eq!(Score::try_from_f64(10.0).unwrap().tenths(), 100);
        assert_eq!(Score::try_from_f64(8.5).unwrap().tenths(), 85);
        assert_eq!(Score::try_from_f64(7.0).unwrap().tenths(), 70);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Score::try_from_f64(10.1).is_err());
        assert!(Score::try_from_f64(-0.1).is_err());
        assert!(Score::try_from_f64(11.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Score::try_from_f64(f64::NAN).is_err());
        assert!(Score::try_from_f64(f64::INFINITY).is_err());
        assert!(Score::try_from_f64(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_excess_precision_rejected() {
        let result = Score::try_from_f64(8.55);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("one decimal place"));
    }

    #[test]
    fn test_binary_float_artifacts_tolerated() {
        // 0.1 etc. are not exactly representable; the epsilon comparison
        // must still accept every legitimate one-decimal value.
        let mut tenths = 0;
        while tenths <= 100 {
            let value = f64::from(tenths) / 10.0;
            assert_eq!(Score::try_from_f64(value).unwrap().tenths(), tenths);
            tenths += 1;
        }
    }

    #[test]
    fn test_total_is_exact() {
        // 8.0 + 7.5 + 9.0 = 24.5 exactly, never 24.499999....
        let total = total_tenths([80, 75, 90]);
        assert_eq!(total, 245);
        assert_eq!(tenths_as_f64(total), 24.5);
    }

    #[test]
    fn test_serializes_as_decimal() {
        let json = serde_json::to_string(&Score::try_from_f64(8.5).unwrap()).unwrap();
        assert_eq!(json, "8.5");
    }
}
