//! Pure validation half of the evaluation admission pipeline.
//!
//! Score and opinion are validated here, once, before the transactional
//! checks in the db layer run. The transport layer only parses and forwards;
//! it never re-implements these rules.

use crate::error::CoreError;
use crate::score::Score;

/// Validate the caller-supplied parts of an evaluation submission.
///
/// Returns the parsed fixed-point score and the trimmed opinion. Errors with
/// `InvalidScore` or `InvalidOpinion`; the remaining admission checks
/// (project existence, evaluator role, self-evaluation, duplicates, the
/// fully-evaluated gate) require database state and run inside
/// `EvaluationRepo::admit`.
pub fn validate_submission(score: f64, opinion: &str) -> Result<(Score, String), CoreError> {
    let score = Score::try_from_f64(score)?;

    let opinion = opinion.trim();
    if opinion.is_empty() {
        return Err(CoreError::InvalidOpinion);
    }

    Ok((score, opinion.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let (score, opinion) = validate_submission(8.5, "  Solid proposal.  ").unwrap();
        assert_eq!(score.tenths(), 85);
        assert_eq!(opinion, "Solid proposal.");
    }

    #[test]
    fn test_score_out_of_range() {
        let err = validate_submission(10.1, "Fine work").unwrap_err();
        assert!(matches!(err, CoreError::InvalidScore(_)));

        let err = validate_submission(-0.1, "Fine work").unwrap_err();
        assert!(matches!(err, CoreError::InvalidScore(_)));
    }

    #[test]
    fn test_blank_opinion_rejected() {
        assert!(matches!(
            validate_submission(5.0, "").unwrap_err(),
            CoreError::InvalidOpinion
        ));
        assert!(matches!(
            validate_submission(5.0, "   \t\n").unwrap_err(),
            CoreError::InvalidOpinion
        ));
    }

    #[test]
    fn test_score_checked_before_opinion() {
        // Both invalid: the score error wins, matching the documented
        // admission order.
        let err = validate_submission(f64::NAN, "").unwrap_err();
        assert!(matches!(err, CoreError::InvalidScore(_)));
    }
}
