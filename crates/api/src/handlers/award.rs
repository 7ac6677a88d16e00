//! Handlers for the `/awards` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use innovatehub_core::error::CoreError;
use innovatehub_core::schedule::{self, SchedulePhase};
use innovatehub_core::types::DbId;
use innovatehub_db::models::award::{Award, CreateAward, UpdateAward};
use innovatehub_db::repositories::AwardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /awards`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAwardRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "year must be positive"))]
    pub year: i32,
    pub schedule: Vec<SchedulePhase>,
}

/// POST /api/v1/awards
///
/// Create an award. The creator is the calling admin.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAwardRequest>,
) -> AppResult<(StatusCode, Json<Award>)> {
    input.validate()?;
    schedule::validate_schedule(&input.schedule)?;

    let create_dto = CreateAward {
        name: input.name,
        description: input.description,
        year: input.year,
        schedule: input.schedule,
        created_by: admin.user_id,
    };

    let award = AwardRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(award)))
}

/// GET /api/v1/awards
///
/// Public listing of awards currently inside one of their schedule phases.
/// Inactive awards stay reachable by id, just not listed.
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Award>>> {
    let today = Utc::now().date_naive();
    let awards = AwardRepo::list(&state.pool).await?;
    let active = awards
        .into_iter()
        .filter(|award| schedule::is_active_at(award.phases(), today))
        .collect();
    Ok(Json(active))
}

/// GET /api/v1/awards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Award>> {
    let award = AwardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Award", id }))?;
    Ok(Json(award))
}

/// PUT /api/v1/awards/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAward>,
) -> AppResult<Json<Award>> {
    if let Some(phases) = &input.schedule {
        schedule::validate_schedule(phases)?;
    }
    if let Some(year) = input.year {
        if year <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "year must be positive".to_string(),
            )));
        }
    }

    let award = AwardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Award", id }))?;
    Ok(Json(award))
}

/// DELETE /api/v1/awards/{id}
///
/// Deletable only while no project references the award.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let count = AwardRepo::count_projects(&state.pool, id).await?;
    if count > 0 {
        return Err(AppError::Core(CoreError::HasProjects { id, count }));
    }

    let deleted = AwardRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Award", id }))
    }
}
