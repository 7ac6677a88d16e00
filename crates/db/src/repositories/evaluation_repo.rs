//! Repository for the `evaluations` table, including the transactional
//! admission pipeline.

use sqlx::PgPool;

use innovatehub_core::error::CoreError;
use innovatehub_core::project;
use innovatehub_core::roles::Role;
use innovatehub_core::types::DbId;

use crate::models::evaluation::{
    Evaluation, EvaluationChanges, EvaluationWithEvaluatorRow, NewEvaluation,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, evaluator_id, score_tenths, opinion, evaluated_at, created_at, updated_at";

/// Joined column list for evaluations with their evaluator expanded.
const JOINED_COLUMNS: &str = "e.id, e.project_id, e.evaluator_id, e.score_tenths, e.opinion, \
                              e.evaluated_at, e.created_at, \
                              u.name AS evaluator_name, u.email AS evaluator_email, \
                              u.role AS evaluator_role, u.specialty AS evaluator_specialty";

/// Failure mode of [`EvaluationRepo::admit`]: either a domain rejection from
/// the admission rules, or an unexpected database error.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Result of a successful admission.
#[derive(Debug)]
pub struct AdmissionOutcome {
    pub evaluation: Evaluation,
    /// Evaluation count for the project after this insert.
    pub evaluation_count: i64,
    /// The project's `evaluated` flag after this insert (true from the third
    /// evaluation onward).
    pub project_evaluated: bool,
}

/// Provides CRUD operations for evaluations plus the admission pipeline.
pub struct EvaluationRepo;

impl EvaluationRepo {
    /// Run the evaluation admission pipeline and record the evaluation.
    ///
    /// The whole sequence -- existence, evaluator role, self-evaluation,
    /// duplicate, fully-evaluated gate, insert, recount, `evaluated` flip --
    /// executes in one transaction holding a `FOR UPDATE` lock on the
    /// project row. Competing admissions for the same project serialize on
    /// that lock, so exactly one submission can become the third evaluation
    /// and flip the flag; later ones fail the gate. Any rejection rolls the
    /// transaction back: an evaluation is either fully admitted, including
    /// the lock flip, or not recorded at all.
    ///
    /// Score and opinion must already be shape-validated
    /// (`innovatehub_core::evaluation::validate_submission`).
    pub async fn admit(
        pool: &PgPool,
        input: &NewEvaluation,
    ) -> Result<AdmissionOutcome, AdmissionError> {
        let mut tx = pool.begin().await?;

        // 1. Project must exist. The row lock serializes competing
        //    admissions for this project until commit/rollback.
        let project: Option<(bool,)> =
            sqlx::query_as("SELECT evaluated FROM projects WHERE id = $1 FOR UPDATE")
                .bind(input.project_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((already_evaluated,)) = project else {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: input.project_id,
            }
            .into());
        };

        // 2. Evaluator must exist and hold the evaluator role.
        let evaluator_role: Option<(String,)> =
            sqlx::query_as("SELECT role FROM users WHERE id = $1")
                .bind(input.evaluator_id)
                .fetch_optional(&mut *tx)
                .await?;
        match evaluator_role {
            Some((role,)) if role == Role::Evaluator.as_str() => {}
            _ => return Err(CoreError::InvalidEvaluator(input.evaluator_id).into()),
        }

        // 3. No self-review: the evaluator must not be in the author set.
        let (is_author,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM project_authors WHERE project_id = $1 AND user_id = $2
             )",
        )
        .bind(input.project_id)
        .bind(input.evaluator_id)
        .fetch_one(&mut *tx)
        .await?;
        if is_author {
            return Err(CoreError::SelfEvaluation {
                project_id: input.project_id,
                evaluator_id: input.evaluator_id,
            }
            .into());
        }

        // 4. At most one evaluation per (project, evaluator) pair.
        let (duplicate,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM evaluations WHERE project_id = $1 AND evaluator_id = $2
             )",
        )
        .bind(input.project_id)
        .bind(input.evaluator_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(CoreError::DuplicateEvaluation {
                project_id: input.project_id,
                evaluator_id: input.evaluator_id,
            }
            .into());
        }

        // 5. Strict gate: a fully evaluated project accepts no more
        //    evaluations.
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM evaluations WHERE project_id = $1")
                .bind(input.project_id)
                .fetch_one(&mut *tx)
                .await?;
        if project::is_fully_evaluated(count) {
            return Err(CoreError::ProjectFullyEvaluated {
                project_id: input.project_id,
            }
            .into());
        }

        // 6. Record the evaluation.
        let query = format!(
            "INSERT INTO evaluations (project_id, evaluator_id, score_tenths, opinion, evaluated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let evaluation = sqlx::query_as::<_, Evaluation>(&query)
            .bind(input.project_id)
            .bind(input.evaluator_id)
            .bind(input.score.tenths())
            .bind(&input.opinion)
            .bind(input.evaluated_at)
            .fetch_one(&mut *tx)
            .await?;

        // 7. Recount and flip `evaluated` once the threshold is reached.
        let evaluation_count = count + 1;
        let newly_locked =
            !already_evaluated && project::is_fully_evaluated(evaluation_count);
        if newly_locked {
            sqlx::query("UPDATE projects SET evaluated = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(input.project_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(AdmissionOutcome {
            evaluation,
            evaluation_count,
            project_evaluated: already_evaluated || newly_locked,
        })
    }

    /// Find an evaluation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Evaluation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM evaluations WHERE id = $1");
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an evaluation with its evaluator expanded.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EvaluationWithEvaluatorRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM evaluations e
             JOIN users u ON u.id = e.evaluator_id
             WHERE e.id = $1"
        );
        sqlx::query_as::<_, EvaluationWithEvaluatorRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all evaluations with their evaluators, in id order.
    pub async fn list_details(
        pool: &PgPool,
    ) -> Result<Vec<EvaluationWithEvaluatorRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM evaluations e
             JOIN users u ON u.id = e.evaluator_id
             ORDER BY e.id"
        );
        sqlx::query_as::<_, EvaluationWithEvaluatorRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// List a project's evaluations with their evaluators, in id order.
    pub async fn list_details_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<EvaluationWithEvaluatorRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM evaluations e
             JOIN users u ON u.id = e.evaluator_id
             WHERE e.project_id = $1
             ORDER BY e.id"
        );
        sqlx::query_as::<_, EvaluationWithEvaluatorRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update score/opinion/date on an existing evaluation. Only non-`None`
    /// fields are applied; the admission pipeline does not re-run here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &EvaluationChanges,
    ) -> Result<Option<Evaluation>, sqlx::Error> {
        let query = format!(
            "UPDATE evaluations SET
                score_tenths = COALESCE($2, score_tenths),
                opinion = COALESCE($3, opinion),
                evaluated_at = COALESCE($4, evaluated_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(id)
            .bind(changes.score_tenths)
            .bind(&changes.opinion)
            .bind(changes.evaluated_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an evaluation. Returns `true` if a row was removed.
    ///
    /// Deletion is not gated and does not clear a project's `evaluated`
    /// flag: the locked state is terminal.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM evaluations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
