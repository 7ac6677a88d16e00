//! Shared seed helpers for db integration tests.
//!
//! Each `#[sqlx::test]` runs against a fresh database, so fixed emails and
//! CPFs never collide across tests.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use innovatehub_core::score::Score;
use innovatehub_core::types::DbId;
use innovatehub_db::models::award::CreateAward;
use innovatehub_db::models::evaluation::NewEvaluation;
use innovatehub_db::models::project::CreateProject;
use innovatehub_db::models::user::{CreateUser, User};
use innovatehub_db::repositories::{AwardRepo, ProjectRepo, UserRepo};
use innovatehub_core::schedule::SchedulePhase;

/// Insert a user with the given role. `tag` keeps email and CPF unique.
pub async fn seed_user(pool: &PgPool, tag: u32, role: &str) -> User {
    let specialty = if role == "evaluator" {
        Some("Computer Science".to_string())
    } else {
        None
    };
    let input = CreateUser {
        name: format!("User {tag}"),
        email: format!("user{tag}@example.com"),
        cpf: format!("{:03}.{:03}.{:03}-{:02}", tag, tag, tag, tag % 100),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        phone: "(11) 98765-4321".to_string(),
        country: "Brasil".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        street: None,
        avenue: None,
        lot: None,
        number: None,
        password_hash: "$argon2id$test-not-a-real-hash".to_string(),
        role: role.to_string(),
        specialty,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("seed user should insert")
}

/// Insert an award with a single year-long phase.
pub async fn seed_award(pool: &PgPool, created_by: DbId) -> innovatehub_db::models::award::Award {
    let input = CreateAward {
        name: "Prize A".to_string(),
        description: "Test award cycle".to_string(),
        year: 2025,
        schedule: vec![SchedulePhase {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            label: "Submission period".to_string(),
        }],
        created_by,
    };
    AwardRepo::create(pool, &input)
        .await
        .expect("seed award should insert")
}

/// Insert a project under `award_id` with the given authors (the first one
/// is the principal author).
pub async fn seed_project(
    pool: &PgPool,
    award_id: DbId,
    author_ids: &[DbId],
) -> innovatehub_db::models::project::Project {
    let input = CreateProject {
        title: "P1".to_string(),
        area: "Technology".to_string(),
        summary: "An AI platform for process automation".to_string(),
        principal_author_id: author_ids[0],
        award_id,
        author_ids: author_ids.to_vec(),
    };
    ProjectRepo::create(pool, &input)
        .await
        .expect("seed project should insert")
}

/// Build a shape-valid admission input.
pub fn submission(project_id: DbId, evaluator_id: DbId, score: f64) -> NewEvaluation {
    NewEvaluation {
        project_id,
        evaluator_id,
        score: Score::try_from_f64(score).expect("test score should be valid"),
        opinion: "Well structured proposal".to_string(),
        evaluated_at: Utc::now(),
    }
}
