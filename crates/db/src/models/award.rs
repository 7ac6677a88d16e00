//! Award entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use innovatehub_core::schedule::SchedulePhase;
use innovatehub_core::types::{DbId, Timestamp};

/// An award row from the `awards` table. The schedule is stored as JSONB and
/// deserialized into the core phase type on read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Award {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub year: i32,
    pub schedule: Json<Vec<SchedulePhase>>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Award {
    /// The schedule phases as a plain slice.
    pub fn phases(&self) -> &[SchedulePhase] {
        &self.schedule.0
    }
}

/// DTO for creating a new award. The creator id comes from the caller's
/// identity, not the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAward {
    pub name: String,
    pub description: String,
    pub year: i32,
    pub schedule: Vec<SchedulePhase>,
    #[serde(skip)]
    pub created_by: DbId,
}

/// DTO for updating an existing award. All fields are optional; a schedule
/// replaces the stored one wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAward {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub schedule: Option<Vec<SchedulePhase>>,
}
