//! Repository for the `awards` table.

use sqlx::types::Json;
use sqlx::PgPool;

use innovatehub_core::types::DbId;

use crate::models::award::{Award, CreateAward, UpdateAward};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, year, schedule, created_by, created_at, updated_at";

/// Provides CRUD operations for awards.
pub struct AwardRepo;

impl AwardRepo {
    /// Insert a new award, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAward) -> Result<Award, sqlx::Error> {
        let query = format!(
            "INSERT INTO awards (name, description, year, schedule, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Award>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.year)
            .bind(Json(&input.schedule))
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an award by its internal ID, regardless of schedule activity.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Award>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM awards WHERE id = $1");
        sqlx::query_as::<_, Award>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all awards ordered by most recently created first. Activity
    /// filtering happens against the schedule in the caller.
    pub async fn list(pool: &PgPool) -> Result<Vec<Award>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM awards ORDER BY created_at DESC");
        sqlx::query_as::<_, Award>(&query).fetch_all(pool).await
    }

    /// Update an award. Only non-`None` fields in `input` are applied; a
    /// schedule replaces the stored one wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAward,
    ) -> Result<Option<Award>, sqlx::Error> {
        let query = format!(
            "UPDATE awards SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                year = COALESCE($4, year),
                schedule = COALESCE($5, schedule),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Award>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.year)
            .bind(input.schedule.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Number of projects submitted under this award.
    pub async fn count_projects(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM projects WHERE award_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Permanently delete an award. Returns `true` if a row was removed.
    /// Callers must check [`Self::count_projects`] first.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM awards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
