//! Evaluation entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use innovatehub_core::score::Score;
use innovatehub_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// An evaluation row from the `evaluations` table. Scores live as whole
/// tenths; use [`EvaluationResponse`] for external output with decimal scores.
#[derive(Debug, Clone, FromRow)]
pub struct Evaluation {
    pub id: DbId,
    pub project_id: DbId,
    pub evaluator_id: DbId,
    pub score_tenths: i16,
    pub opinion: String,
    pub evaluated_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Evaluation {
    pub fn score(&self) -> Score {
        Score::from_tenths(self.score_tenths)
    }
}

/// External evaluation shape: the score is a decimal number.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub id: DbId,
    pub project_id: DbId,
    pub evaluator_id: DbId,
    pub score: Score,
    pub opinion: String,
    pub evaluated_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(e: Evaluation) -> Self {
        let score = e.score();
        EvaluationResponse {
            id: e.id,
            project_id: e.project_id,
            evaluator_id: e.evaluator_id,
            score,
            opinion: e.opinion,
            evaluated_at: e.evaluated_at,
            created_at: e.created_at,
        }
    }
}

/// Flat row produced by the evaluations-with-evaluator join.
#[derive(Debug, Clone, FromRow)]
pub struct EvaluationWithEvaluatorRow {
    pub id: DbId,
    pub project_id: DbId,
    pub evaluator_id: DbId,
    pub score_tenths: i16,
    pub opinion: String,
    pub evaluated_at: Timestamp,
    pub created_at: Timestamp,
    pub evaluator_name: String,
    pub evaluator_email: String,
    pub evaluator_role: String,
    pub evaluator_specialty: Option<String>,
}

/// Evaluation with its evaluator expanded, for list/detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationDetail {
    pub id: DbId,
    pub project_id: DbId,
    pub score: Score,
    pub opinion: String,
    pub evaluated_at: Timestamp,
    pub created_at: Timestamp,
    pub evaluator: UserSummary,
}

impl From<EvaluationWithEvaluatorRow> for EvaluationDetail {
    fn from(row: EvaluationWithEvaluatorRow) -> Self {
        EvaluationDetail {
            id: row.id,
            project_id: row.project_id,
            score: Score::from_tenths(row.score_tenths),
            opinion: row.opinion,
            evaluated_at: row.evaluated_at,
            created_at: row.created_at,
            evaluator: UserSummary {
                id: row.evaluator_id,
                name: row.evaluator_name,
                email: row.evaluator_email,
                role: row.evaluator_role,
                specialty: row.evaluator_specialty,
            },
        }
    }
}

/// Input to [`crate::repositories::EvaluationRepo::admit`]: an already
/// shape-validated submission.
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub project_id: DbId,
    pub evaluator_id: DbId,
    pub score: Score,
    pub opinion: String,
    pub evaluated_at: Timestamp,
}

/// DTO for updating score/opinion/date on an existing evaluation.
///
/// Reassignment of project or evaluator is not supported; the admission
/// pipeline only runs at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvaluation {
    pub score: Option<f64>,
    pub opinion: Option<String>,
    pub evaluated_at: Option<Timestamp>,
}

/// Shape-validated changes handed to the repository update.
#[derive(Debug, Clone, Default)]
pub struct EvaluationChanges {
    pub score_tenths: Option<i16>,
    pub opinion: Option<String>,
    pub evaluated_at: Option<Timestamp>,
}
