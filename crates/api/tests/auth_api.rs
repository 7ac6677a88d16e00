//! HTTP-level tests for registration, login, and the identity gate.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    assert_error, body_json, build_test_app, get_auth, post_json, seed_user, test_config,
    token_for, TEST_PASSWORD,
};
use innovatehub_api::auth::jwt::{generate_access_token, JwtConfig};
use innovatehub_core::roles::Role;

fn registration_payload(email: &str, role: &str) -> serde_json::Value {
    json!({
        "name": "Ana Carolina Silva",
        "email": email,
        "cpf": "123.456.789-09",
        "birth_date": "1990-03-15",
        "phone": "(21) 99876-5432",
        "country": "Brasil",
        "city": "Rio de Janeiro",
        "state": "RJ",
        "password": "Autor@2023!",
        "role": role,
        "specialty": null,
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_author_and_login(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let payload = registration_payload("ana.silva@tecnologia.com", "author");
    let response = post_json(app, "/api/v1/users", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["role"], "author");
    assert!(created.get("password_hash").is_none(), "hash must not leak");

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({"email": "ana.silva@tecnologia.com", "password": "Autor@2023!"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let auth = body_json(response).await;
    assert!(auth["access_token"].is_string());
    assert_eq!(auth["user"]["role"], "author");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_rejects_wrong_password(pool: PgPool) {
    let user = seed_user(&pool, 1, Role::Author).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({"email": user.email, "password": "not-the-password"}),
    )
    .await;
    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    // Unknown email must be indistinguishable from a wrong password.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({"email": "nobody@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    let other = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(json["error"], other["error"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_routes_require_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects", "garbage-token").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    // Expired and forged tokens collapse into the same response.
    let user = seed_user(&pool, 1, Role::Author).await;
    let expired_config = JwtConfig {
        access_token_expiry_mins: -10,
        ..test_config().jwt
    };
    let expired = generate_access_token(user.id, Role::Author, &expired_config).unwrap();

    let app = build_test_app(pool.clone());
    let expired_resp = get_auth(app, "/api/v1/projects", &expired).await;
    let expired_body = assert_error(expired_resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    let forged_config = JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        ..test_config().jwt
    };
    let forged = generate_access_token(user.id, Role::Author, &forged_config).unwrap();

    let app = build_test_app(pool);
    let forged_resp = get_auth(app, "/api/v1/projects", &forged).await;
    let forged_body = assert_error(forged_resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    assert_eq!(
        expired_body["error"], forged_body["error"],
        "expired and forged tokens must be indistinguishable"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_role_cannot_self_register(pool: PgPool) {
    let app = build_test_app(pool);
    let payload = registration_payload("boss@example.com", "admin");
    let response = post_json(app, "/api/v1/users", payload).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validates_field_shapes(pool: PgPool) {
    // Malformed email reports a per-field message.
    let app = build_test_app(pool.clone());
    let payload = registration_payload("not-an-email", "author");
    let response = post_json(app, "/api/v1/users", payload).await;
    let json = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    let details = json["details"].as_array().expect("details array");
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("email")));

    // Malformed CPF.
    let app = build_test_app(pool.clone());
    let mut payload = registration_payload("ok@example.com", "author");
    payload["cpf"] = json!("12345678909");
    let response = post_json(app, "/api/v1/users", payload).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    // Evaluator without specialty.
    let app = build_test_app(pool);
    let payload = registration_payload("eva@example.com", "evaluator");
    let response = post_json(app, "/api/v1/users", payload).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let user = seed_user(&pool, 1, Role::Author).await;

    let app = build_test_app(pool);
    let payload = registration_payload(&user.email, "author");
    let response = post_json(app, "/api/v1/users", payload).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_minted_token_reaches_protected_route(pool: PgPool) {
    let user = seed_user(&pool, 1, Role::Author).await;
    let token = token_for(&user);

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
