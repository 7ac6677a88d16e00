//! Award schedule phases and the activity window check.
//!
//! An award carries an ordered list of phases, each a labeled `[start, end]`
//! date interval. The award is active on a given date when any phase contains
//! it; phase labels are not interpreted. Phases need not be chronological and
//! may overlap, but each one must be a well-formed interval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A labeled interval within an award's lifecycle, e.g. a submission period
/// or an evaluation round. Both endpoints are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePhase {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// Whether any phase contains `on`. An empty schedule is never active.
pub fn is_active_at(phases: &[SchedulePhase], on: NaiveDate) -> bool {
    phases.iter().any(|p| p.start <= on && on <= p.end)
}

/// Validate an award schedule: at least one phase, non-blank labels, and
/// `start <= end` for every phase.
pub fn validate_schedule(phases: &[SchedulePhase]) -> Result<(), CoreError> {
    if phases.is_empty() {
        return Err(CoreError::Validation(
            "An award must have at least one schedule phase".to_string(),
        ));
    }

    for (index, phase) in phases.iter().enumerate() {
        if phase.label.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Schedule phase {} is missing a label",
                index + 1
            )));
        }
        if phase.start > phase.end {
            return Err(CoreError::Validation(format!(
                "Schedule phase {} ends before it starts ({} > {})",
                index + 1,
                phase.start,
                phase.end
            )));
        }
    }

    Ok(())
}
