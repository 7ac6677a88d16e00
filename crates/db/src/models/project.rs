//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use innovatehub_core::ranking::ProjectStanding;
use innovatehub_core::score;
use innovatehub_core::types::{DbId, Timestamp};

use crate::models::award::Award;
use crate::models::evaluation::EvaluationDetail;
use crate::models::user::UserSummary;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub area: String,
    pub summary: String,
    pub submitted_at: Timestamp,
    pub evaluated: bool,
    pub winner: bool,
    pub principal_author_id: DbId,
    pub award_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The principal author is always included
/// in `author_ids` by the time this reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub area: String,
    pub summary: String,
    pub principal_author_id: DbId,
    pub award_id: DbId,
    pub author_ids: Vec<DbId>,
}

/// DTO for structural updates. All fields optional; `author_ids`, when
/// present, replaces the author set wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub area: Option<String>,
    pub summary: Option<String>,
    pub award_id: Option<DbId>,
    pub author_ids: Option<Vec<DbId>>,
}

/// Project with optional relation expansions, for list and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<UserSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluations: Option<Vec<EvaluationDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award: Option<Award>,
}

/// Flat row from the aggregate totals query (project columns plus summed
/// score tenths and evaluation count).
#[derive(Debug, Clone, FromRow)]
pub struct ProjectStandingRow {
    pub id: DbId,
    pub title: String,
    pub area: String,
    pub summary: String,
    pub submitted_at: Timestamp,
    pub evaluated: bool,
    pub winner: bool,
    pub principal_author_id: DbId,
    pub award_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub total_tenths: i64,
    pub evaluation_count: i64,
}

impl ProjectStandingRow {
    /// The ranking input for this row.
    pub fn standing(&self) -> ProjectStanding {
        ProjectStanding {
            project_id: self.id,
            total_tenths: self.total_tenths,
            evaluation_count: self.evaluation_count,
        }
    }
}

/// Ranked project shape returned by the winners endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RankedProject {
    #[serde(flatten)]
    pub project: Project,
    /// Sum of evaluation scores as a decimal.
    pub total_score: f64,
    pub evaluation_count: i64,
}

impl From<ProjectStandingRow> for RankedProject {
    fn from(row: ProjectStandingRow) -> Self {
        RankedProject {
            total_score: score::tenths_as_f64(row.total_tenths),
            evaluation_count: row.evaluation_count,
            project: Project {
                id: row.id,
                title: row.title,
                area: row.area,
                summary: row.summary,
                submitted_at: row.submitted_at,
                evaluated: row.evaluated,
                winner: row.winner,
                principal_author_id: row.principal_author_id,
                award_id: row.award_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
