//! Repository for the `users` table.

use sqlx::PgPool;

use innovatehub_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, cpf, birth_date, phone, country, city, state, \
                       street, avenue, lot, number, password_hash, role, specialty, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, cpf, birth_date, phone, country, city, state,
                                street, avenue, lot, number, password_hash, role, specialty)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.cpf)
            .bind(input.birth_date)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.street)
            .bind(&input.avenue)
            .bind(&input.lot)
            .bind(&input.number)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.specialty)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users holding the given role, ordered by name.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY name");
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Among `ids`, return the ones that resolve to users with the author
    /// role. Used to validate submitted author sets.
    pub async fn filter_author_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = ANY($1) AND role = 'author'")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Compact summaries for a set of user ids, ordered by name.
    pub async fn summaries(pool: &PgPool, ids: &[DbId]) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role, specialty FROM users WHERE id = ANY($1) ORDER BY name",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Update a user's profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                cpf = COALESCE($4, cpf),
                birth_date = COALESCE($5, birth_date),
                phone = COALESCE($6, phone),
                country = COALESCE($7, country),
                city = COALESCE($8, city),
                state = COALESCE($9, state),
                street = COALESCE($10, street),
                avenue = COALESCE($11, avenue),
                lot = COALESCE($12, lot),
                number = COALESCE($13, number),
                specialty = COALESCE($14, specialty),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.cpf)
            .bind(input.birth_date)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.street)
            .bind(&input.avenue)
            .bind(&input.lot)
            .bind(&input.number)
            .bind(&input.specialty)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    ///
    /// Authorship rows cascade away; recorded evaluations RESTRICT the
    /// delete, which surfaces as a foreign-key violation for the caller to
    /// classify.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
