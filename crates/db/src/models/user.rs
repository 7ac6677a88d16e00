//! User entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use innovatehub_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] or [`UserSummary`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: Option<String>,
    pub avenue: Option<String>,
    pub lot: Option<String>,
    pub number: Option<String>,
    pub password_hash: String,
    /// Stored lowercase; parse with `Role::from_str` at authorization sites.
    pub role: String,
    pub specialty: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: Option<String>,
    pub avenue: Option<String>,
    pub lot: Option<String>,
    pub number: Option<String>,
    pub role: String,
    pub specialty: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            cpf: user.cpf,
            birth_date: user.birth_date,
            phone: user.phone,
            country: user.country,
            city: user.city,
            state: user.state,
            street: user.street,
            avenue: user.avenue,
            lot: user.lot,
            number: user.number,
            role: user.role,
            specialty: user.specialty,
            created_at: user.created_at,
        }
    }
}

/// Compact user shape embedded in project/evaluation expansions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub specialty: Option<String>,
}

/// DTO for inserting a new user. The password arrives already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: Option<String>,
    pub avenue: Option<String>,
    pub lot: Option<String>,
    pub number: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub specialty: Option<String>,
}

/// DTO for updating an existing user. All fields are optional; the role and
/// password are never changed through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
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
