//! Handlers for the `/evaluations` resource.
//!
//! Submission runs the full admission pipeline; update re-validates only
//! score/opinion shape, and delete is ungated beyond authentication. That
//! asymmetry is inherited deliberately: the locked state a deletion might
//! fall below is terminal and never reopens.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use innovatehub_core::error::CoreError;
use innovatehub_core::evaluation::validate_submission;
use innovatehub_core::types::{DbId, Timestamp};
use innovatehub_db::models::evaluation::{
    EvaluationChanges, EvaluationDetail, EvaluationResponse, NewEvaluation, UpdateEvaluation,
};
use innovatehub_db::repositories::EvaluationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEvaluator;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /evaluations`. The evaluator is the caller; there
/// is no on-behalf submission.
#[derive(Debug, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub project_id: DbId,
    pub score: f64,
    pub opinion: String,
    /// Defaults to the submission instant.
    pub evaluated_at: Option<Timestamp>,
}

/// Response for an admitted evaluation.
#[derive(Debug, Serialize)]
pub struct SubmitEvaluationResponse {
    pub evaluation: EvaluationResponse,
    /// The project's `evaluated` flag after this submission.
    pub project_evaluated: bool,
    /// The project's evaluation count after this submission.
    pub evaluation_count: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/evaluations
///
/// Run the admission pipeline and record the evaluation. The third admitted
/// evaluation flips the project's `evaluated` flag in the same transaction.
pub async fn submit(
    State(state): State<AppState>,
    RequireEvaluator(caller): RequireEvaluator,
    Json(input): Json<SubmitEvaluationRequest>,
) -> AppResult<(StatusCode, Json<SubmitEvaluationResponse>)> {
    let (score, opinion) = validate_submission(input.score, &input.opinion)?;

    let new_evaluation = NewEvaluation {
        project_id: input.project_id,
        evaluator_id: caller.user_id,
        score,
        opinion,
        evaluated_at: input.evaluated_at.unwrap_or_else(Utc::now),
    };

    let outcome = EvaluationRepo::admit(&state.pool, &new_evaluation).await?;

    tracing::info!(
        evaluation_id = outcome.evaluation.id,
        project_id = input.project_id,
        evaluator_id = caller.user_id,
        evaluation_count = outcome.evaluation_count,
        project_evaluated = outcome.project_evaluated,
        "Evaluation admitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitEvaluationResponse {
            evaluation: outcome.evaluation.into(),
            project_evaluated: outcome.project_evaluated,
            evaluation_count: outcome.evaluation_count,
        }),
    ))
}

/// GET /api/v1/evaluations
pub async fn list(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<EvaluationDetail>>> {
    let rows = EvaluationRepo::list_details(&state.pool).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/evaluations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<EvaluationDetail>> {
    let row = EvaluationRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Evaluation",
            id,
        }))?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/evaluations/{id}
///
/// Update score/opinion/date. Shape checks only; the admission pipeline does
/// not re-run, and project/evaluator cannot be reassigned.
pub async fn update(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvaluation>,
) -> AppResult<Json<EvaluationResponse>> {
    let mut changes = EvaluationChanges {
        evaluated_at: input.evaluated_at,
        ..Default::default()
    };

    if let Some(raw_score) = input.score {
        let score = innovatehub_core::score::Score::try_from_f64(raw_score)?;
        changes.score_tenths = Some(score.tenths());
    }
    if let Some(opinion) = input.opinion {
        let trimmed = opinion.trim();
        if trimmed.is_empty() {
            return Err(AppError::Core(CoreError::InvalidOpinion));
        }
        changes.opinion = Some(trimmed.to_string());
    }

    let evaluation = EvaluationRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Evaluation",
            id,
        }))?;
    Ok(Json(evaluation.into()))
}

/// DELETE /api/v1/evaluations/{id}
///
/// Ungated. Does not clear a project's `evaluated` flag.
pub async fn delete(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EvaluationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Evaluation",
            id,
        }))
    }
}
