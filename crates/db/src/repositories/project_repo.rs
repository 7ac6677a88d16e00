//! Repository for the `projects` table and its author set.

use sqlx::{PgPool, Postgres, Transaction};

use innovatehub_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectStandingRow, UpdateProject};
use crate::models::user::UserSummary;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, area, summary, submitted_at, evaluated, winner, \
                       principal_author_id, award_id, created_at, updated_at";

/// Provides CRUD operations for projects and their author associations.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project together with its author set, in one transaction.
    ///
    /// `input.author_ids` must already include the principal author and must
    /// already be validated against the author role.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, area, summary, principal_author_id, award_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.area)
            .bind(&input.summary)
            .bind(input.principal_author_id)
            .bind(input.award_id)
            .fetch_one(&mut *tx)
            .await?;

        replace_authors(&mut tx, project.id, &input.author_ids).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects filtered on the `evaluated` flag, in id order.
    pub async fn list_by_evaluated(
        pool: &PgPool,
        evaluated: bool,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE evaluated = $1 ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(evaluated)
            .fetch_all(pool)
            .await
    }

    /// Apply a structural update. Only non-`None` fields are applied; when
    /// `author_ids` is present it replaces the author set wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists. The lock check
    /// (`evaluated` still false) is the caller's responsibility.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                area = COALESCE($3, area),
                summary = COALESCE($4, summary),
                award_id = COALESCE($5, award_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.area)
            .bind(&input.summary)
            .bind(input.award_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        if let Some(author_ids) = &input.author_ids {
            replace_authors(&mut tx, id, author_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project. Returns `true` if a row was removed.
    /// Callers must check [`Self::count_evaluations`] first.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of evaluations recorded for this project.
    pub async fn count_evaluations(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM evaluations WHERE project_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// The project's author set as compact summaries, ordered by name.
    pub async fn authors(pool: &PgPool, id: DbId) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.name, u.email, u.role, u.specialty
             FROM project_authors pa
             JOIN users u ON u.id = pa.user_id
             WHERE pa.project_id = $1
             ORDER BY u.name",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// All projects with their aggregate score (in tenths) and evaluation
    /// count, in id order so downstream ranking ties are deterministic.
    pub async fn list_with_totals(pool: &PgPool) -> Result<Vec<ProjectStandingRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectStandingRow>(
            "SELECT p.id, p.title, p.area, p.summary, p.submitted_at, p.evaluated, p.winner,
                    p.principal_author_id, p.award_id, p.created_at, p.updated_at,
                    COALESCE(SUM(e.score_tenths), 0)::BIGINT AS total_tenths,
                    COUNT(e.id) AS evaluation_count
             FROM projects p
             LEFT JOIN evaluations e ON e.project_id = p.id
             GROUP BY p.id
             ORDER BY p.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Persist the winner cache: clear every flag, then set it for `ids`.
    /// One transaction so readers never observe a half-written set.
    pub async fn set_winner_flags(pool: &PgPool, ids: &[DbId]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE projects SET winner = FALSE, updated_at = NOW() WHERE winner")
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE projects SET winner = TRUE, updated_at = NOW() WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Replace a project's author rows inside an open transaction.
async fn replace_authors(
    tx: &mut Transaction<'_, Postgres>,
    project_id: DbId,
    author_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_authors WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "INSERT INTO project_authors (project_id, user_id)
         SELECT $1, unnest($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(project_id)
    .bind(author_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
