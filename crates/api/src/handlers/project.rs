//! Handlers for the `/projects` resource.
//!
//! Creation is gated by the award's eligibility window; structural updates
//! by the lifecycle lock; deletion by the evaluation count. Winner listing
//! is derived at read time from summed scores.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use innovatehub_core::error::CoreError;
use innovatehub_core::ranking;
use innovatehub_core::roles::Role;
use innovatehub_core::schedule;
use innovatehub_core::types::DbId;
use innovatehub_core::project as lifecycle;
use innovatehub_db::models::project::{
    CreateProject, Project, ProjectDetail, RankedProject, UpdateProject,
};
use innovatehub_db::repositories::{AwardRepo, EvaluationRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuthor};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "area is required"))]
    pub area: String,
    #[validate(length(min = 1, message = "summary is required"))]
    pub summary: String,
    pub award_id: DbId,
    /// Co-authors; the principal author is added automatically.
    #[serde(default)]
    pub author_ids: Vec<DbId>,
    /// Required when an admin creates on behalf of an author; ignored (the
    /// caller wins) for author-role callers.
    pub principal_author_id: Option<DbId>,
}

/// Typed relation-expansion flags for `GET /projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    #[serde(default)]
    pub with_authors: bool,
    #[serde(default)]
    pub with_evaluations: bool,
}

/// Response for an admitted winner recompute.
#[derive(Debug, Serialize)]
pub struct RecomputeWinnersResponse {
    pub winner_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// Submit a project into an award cycle. The award must be inside one of its
/// schedule phases on the submission date. Every author id must resolve to a
/// user with the author role; the principal author is always included.
pub async fn create(
    State(state): State<AppState>,
    RequireAuthor(caller): RequireAuthor,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;

    // 1. The award must exist and be open for submission.
    let award = AwardRepo::find_by_id(&state.pool, input.award_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Award",
            id: input.award_id,
        }))?;
    if !schedule::is_active_at(award.phases(), Utc::now().date_naive()) {
        return Err(AppError::Core(CoreError::Validation(
            "Award is not open for submission".to_string(),
        )));
    }

    // 2. Resolve the principal author from the caller identity.
    let principal_author_id = match caller.role {
        Role::Author => caller.user_id,
        Role::Admin => input.principal_author_id.ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "principal_author_id is required when an admin submits on behalf of an author"
                    .to_string(),
            ))
        })?,
        // RequireAuthor already excluded evaluators.
        Role::Evaluator => unreachable!("RequireAuthor rejects evaluators"),
    };

    // 3. Validate the full author set.
    let mut author_ids = input.author_ids.clone();
    if !author_ids.contains(&principal_author_id) {
        author_ids.push(principal_author_id);
    }
    author_ids.sort_unstable();
    author_ids.dedup();
    validate_author_ids(&state, &author_ids).await?;

    let create_dto = CreateProject {
        title: input.title,
        area: input.area,
        summary: input.summary,
        principal_author_id,
        award_id: input.award_id,
        author_ids,
    };

    let project = ProjectRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// List all projects. Relation expansion is opt-in via typed query flags.
pub async fn list(
    State(state): State<AppState>,
    _caller: AuthUser,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<Vec<ProjectDetail>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        details.push(expand(&state, project, &params).await?);
    }
    Ok(Json(details))
}

/// GET /api/v1/projects/not-evaluated
pub async fn list_not_evaluated(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(ProjectRepo::list_by_evaluated(&state.pool, false).await?))
}

/// GET /api/v1/projects/evaluated
pub async fn list_evaluated(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(ProjectRepo::list_by_evaluated(&state.pool, true).await?))
}

/// GET /api/v1/projects/winners
///
/// Top three projects by summed evaluation score, computed at read time.
/// The persisted `winner` flag is only a cache (see the recompute endpoint).
pub async fn list_winners(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<RankedProject>>> {
    Ok(Json(current_winners(&state).await?))
}

/// POST /api/v1/projects/winners/recompute
///
/// Persist the current top three into the `winner` flags, clearing the flag
/// everywhere else. Evaluating or deleting evaluations afterwards makes the
/// cache stale until the next recompute.
pub async fn recompute_winners(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<RecomputeWinnersResponse>> {
    let winners = current_winners(&state).await?;
    let winner_ids: Vec<DbId> = winners.iter().map(|w| w.project.id).collect();
    ProjectRepo::set_winner_flags(&state.pool, &winner_ids).await?;
    Ok(Json(RecomputeWinnersResponse { winner_ids }))
}

/// GET /api/v1/projects/{id}
///
/// Project detail with authors, evaluations, and award expanded.
pub async fn get_by_id(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let params = ProjectListParams {
        with_authors: true,
        with_evaluations: true,
    };
    let mut detail = expand(&state, project, &params).await?;
    detail.award = AwardRepo::find_by_id(&state.pool, detail.project.award_id).await?;
    Ok(Json(detail))
}

/// PUT /api/v1/projects/{id}
///
/// Structural update. Fails with `ProjectLocked` once the project is
/// evaluated. Replacing the author set re-runs author validation and keeps
/// the principal author a member.
pub async fn update(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    lifecycle::ensure_editable(project.id, project.evaluated)?;

    if let Some(award_id) = input.award_id {
        AwardRepo::find_by_id(&state.pool, award_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Award",
                id: award_id,
            }))?;
    }

    if let Some(author_ids) = &mut input.author_ids {
        if !author_ids.contains(&project.principal_author_id) {
            author_ids.push(project.principal_author_id);
        }
        author_ids.sort_unstable();
        author_ids.dedup();
        validate_author_ids(&state, author_ids).await?;
    }

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/projects/{id}
///
/// Fails with `HasEvaluations` while any evaluation exists, locked or not.
pub async fn delete(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let count = ProjectRepo::count_evaluations(&state.pool, id).await?;
    lifecycle::ensure_deletable(id, count)?;

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Every id must resolve to an existing user with the author role.
async fn validate_author_ids(state: &AppState, ids: &[DbId]) -> Result<(), AppError> {
    let valid = UserRepo::filter_author_ids(&state.pool, ids).await?;
    if valid.len() != ids.len() {
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !valid.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(AppError::Core(CoreError::InvalidAuthors(format!(
            "Users [{}] do not exist or are not authors",
            missing.join(", ")
        ))));
    }
    Ok(())
}

/// Attach the requested relation expansions to a project.
async fn expand(
    state: &AppState,
    project: Project,
    params: &ProjectListParams,
) -> Result<ProjectDetail, AppError> {
    let authors = if params.with_authors {
        Some(ProjectRepo::authors(&state.pool, project.id).await?)
    } else {
        None
    };
    let evaluations = if params.with_evaluations {
        let rows = EvaluationRepo::list_details_for_project(&state.pool, project.id).await?;
        Some(rows.into_iter().map(Into::into).collect())
    } else {
        None
    };
    Ok(ProjectDetail {
        project,
        authors,
        evaluations,
        award: None,
    })
}

/// Compute the current top three from live totals.
async fn current_winners(state: &AppState) -> Result<Vec<RankedProject>, AppError> {
    let rows = ProjectRepo::list_with_totals(&state.pool).await?;
    let winner_ids = ranking::winners(rows.iter().map(|r| r.standing()).collect());

    // Preserve rank order in the response.
    let winners = winner_ids
        .into_iter()
        .filter_map(|id| rows.iter().find(|r| r.id == id).cloned())
        .map(Into::into)
        .collect();
    Ok(winners)
}
