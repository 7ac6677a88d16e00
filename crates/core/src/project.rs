//! Project lifecycle rules.
//!
//! A project is editable until it has received [`EVALUATION_THRESHOLD`]
//! evaluations, at which point its `evaluated` flag flips and structural
//! fields lock. Locked is terminal: deleting evaluations afterwards does not
//! reopen the project.

use crate::error::CoreError;
use crate::types::DbId;

/// Number of accepted evaluations that closes a project's evaluation and
/// locks its structural fields.
pub const EVALUATION_THRESHOLD: i64 = 3;

/// Whether a project with `count` evaluations has reached the threshold.
pub fn is_fully_evaluated(count: i64) -> bool {
    count >= EVALUATION_THRESHOLD
}

/// Guard for structural mutations (title, summary, area, authors, award).
pub fn ensure_editable(id: DbId, evaluated: bool) -> Result<(), CoreError> {
    if evaluated {
        return Err(CoreError::ProjectLocked { id });
    }
    Ok(())
}

/// Guard for deletion. A project with any evaluations cannot be deleted,
/// locked or not.
pub fn ensure_deletable(id: DbId, evaluation_count: i64) -> Result<(), CoreError> {
    if evaluation_count > 0 {
        return Err(CoreError::HasEvaluations {
            id,
            count: evaluation_count,
        });
    }
    Ok(())
}
