//! Handlers for the `/users` resource (registration, profiles, role listings).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use innovatehub_core::error::CoreError;
use innovatehub_core::roles::Role;
use innovatehub_core::types::DbId;
use innovatehub_core::users;
use innovatehub_db::models::user::{CreateUser, UpdateUser, UserResponse};
use innovatehub_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users` (public self-registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    pub street: Option<String>,
    pub avenue: Option<String>,
    pub lot: Option<String>,
    pub number: Option<String>,
    pub password: String,
    /// `"author"` or `"evaluator"`; admins are seeded, never registered.
    pub role: String,
    pub specialty: Option<String>,
}

/// Request body for `PUT /users/{id}`. Role and password never change here.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
    pub avenue: Option<String>,
    pub lot: Option<String>,
    pub number: Option<String>,
    pub specialty: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Public self-registration for authors and evaluators.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    // Field shapes first, then the cross-field domain rules.
    input.validate()?;

    let role: Role = input.role.parse().map_err(AppError::Core)?;
    if !role.self_registrable() {
        return Err(AppError::Core(CoreError::Validation(
            "Role must be author or evaluator".to_string(),
        )));
    }

    users::validate_cpf(&input.cpf)?;
    users::validate_phone(&input.phone)?;
    users::validate_specialty(role, input.specialty.as_deref())?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        name: input.name,
        email: input.email,
        cpf: input.cpf,
        birth_date: input.birth_date,
        phone: input.phone,
        country: input.country,
        city: input.city,
        state: input.state,
        street: input.street,
        avenue: input.avenue,
        lot: input.lot,
        number: input.number,
        password_hash,
        role: role.as_str().to_string(),
        specialty: input.specialty,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/authors
pub async fn list_authors(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let authors = UserRepo::list_by_role(&state.pool, Role::Author.as_str()).await?;
    Ok(Json(authors.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/users/evaluators
pub async fn list_evaluators(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let evaluators = UserRepo::list_by_role(&state.pool, Role::Evaluator.as_str()).await?;
    Ok(Json(evaluators.into_iter().map(Into::into).collect()))
}

/// PUT /api/v1/users/{id}
///
/// Profile update by the user themselves or an admin.
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    ensure_self_or_admin(&caller, id)?;

    if let Some(cpf) = &input.cpf {
        users::validate_cpf(cpf)?;
    }
    if let Some(phone) = &input.phone {
        users::validate_phone(phone)?;
    }

    let update_dto = UpdateUser {
        name: input.name,
        email: input.email,
        cpf: input.cpf,
        birth_date: input.birth_date,
        phone: input.phone,
        country: input.country,
        city: input.city,
        state: input.state,
        street: input.street,
        avenue: input.avenue,
        lot: input.lot,
        number: input.number,
        specialty: input.specialty,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
///
/// Deletion by the user themselves or an admin. Authorship rows cascade
/// away; recorded evaluations block the delete (surfaced as 409).
pub async fn delete(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_self_or_admin(&caller, id)?;

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// Allow the operation for the subject user or any admin.
fn ensure_self_or_admin(caller: &AuthUser, subject: DbId) -> Result<(), AppError> {
    if caller.user_id == subject || caller.is_admin() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You may only manage your own account".into(),
        )))
    }
}
