//! Shared test harness: router construction, request helpers, and seed data.
//!
//! Each `#[sqlx::test]` runs against a fresh database. Tokens are minted
//! directly with the test JWT config instead of logging in, except where a
//! test exercises the login endpoint itself.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use innovatehub_api::auth::jwt::{generate_access_token, JwtConfig};
use innovatehub_api::auth::password::hash_password;
use innovatehub_api::config::ServerConfig;
use innovatehub_api::router::build_app_router;
use innovatehub_api::state::AppState;
use innovatehub_core::roles::Role;
use innovatehub_core::schedule::SchedulePhase;
use innovatehub_core::types::DbId;
use innovatehub_db::models::award::{Award, CreateAward};
use innovatehub_db::models::user::{CreateUser, User};
use innovatehub_db::repositories::{AwardRepo, UserRepo};

/// Password used for every seeded account.
pub const TEST_PASSWORD: &str = "senha-muito-segura";

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, mirroring
/// the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint an access token for a seeded user.
pub fn token_for(user: &User) -> String {
    let role: Role = user.role.parse().expect("seeded role should parse");
    generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    send(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(app: Router, path: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, path, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, path: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, path, Some(token), None).await
}

pub async fn put_json_auth(app: Router, path: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, path, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response carries the given status and machine-checkable error
/// code, returning the body for further inspection.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error code in {json}");
    json
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Insert a user with the given role and the shared test password.
pub async fn seed_user(pool: &PgPool, tag: u32, role: Role) -> User {
    let specialty = match role {
        Role::Evaluator => Some("Computer Science".to_string()),
        Role::Author | Role::Admin => None,
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
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.as_str().to_string(),
        specialty,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("seed user should insert")
}

/// Insert an award whose single phase contains today.
pub async fn seed_open_award(pool: &PgPool, created_by: DbId) -> Award {
    seed_award_with_phase(pool, created_by, "2020-01-01", "2099-12-31").await
}

/// Insert an award with one explicit phase.
pub async fn seed_award_with_phase(
    pool: &PgPool,
    created_by: DbId,
    start: &str,
    end: &str,
) -> Award {
    let input = CreateAward {
        name: "Prize A".to_string(),
        description: "Award cycle".to_string(),
        year: 2025,
        schedule: vec![SchedulePhase {
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            label: "Submission period".to_string(),
        }],
        created_by,
    };
    AwardRepo::create(pool, &input)
        .await
        .expect("seed award should insert")
}

/// Register a project over HTTP as `author`, returning its id.
pub async fn create_project_via_api(
    pool: &PgPool,
    author_token: &str,
    award_id: DbId,
) -> DbId {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        author_token,
        serde_json::json!({
            "title": "P1",
            "area": "Technology",
            "summary": "An AI platform for process automation",
            "award_id": award_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
