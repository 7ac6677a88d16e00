//! HTTP-level tests for the `/projects` resource: submission windows,
//! author-set validation, the lifecycle lock, deletion rules, listings, and
//! winner derivation.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    assert_error, body_json, build_test_app, create_project_via_api, delete_auth, get_auth,
    post_auth, post_json_auth, put_json_auth, seed_award_with_phase, seed_open_award, seed_user,
    token_for,
};
use innovatehub_core::roles::Role;
use innovatehub_core::types::DbId;

/// Submit one evaluation over HTTP, asserting 201.
async fn evaluate(pool: &PgPool, evaluator_token: &str, project_id: DbId, score: f64) {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/evaluations",
        evaluator_token,
        json!({"project_id": project_id, "score": score, "opinion": "Consistent work"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Drive a project to the locked state with three evaluations.
async fn lock_project(pool: &PgPool, project_id: DbId, first_tag: u32) {
    for (offset, score) in [(0, 8.0), (1, 7.5), (2, 9.0)] {
        let evaluator = seed_user(pool, first_tag + offset, Role::Evaluator).await;
        evaluate(pool, &token_for(&evaluator), project_id, score).await;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_author_creates_project_and_joins_author_set(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;

    let project_id = create_project_via_api(&pool, &token_for(&author), award.id).await;

    // The caller became principal author and a member of the author set.
    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["principal_author_id"], author.id);
    assert_eq!(detail["evaluated"], false);
    let author_ids: Vec<i64> = detail["authors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(author_ids, vec![author.id]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_evaluator_cannot_create_project(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let evaluator = seed_user(&pool, 2, Role::Evaluator).await;
    let award = seed_open_award(&pool, admin.id).await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&evaluator),
        json!({"title": "X", "area": "Y", "summary": "Z", "award_id": award.id}),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_creates_on_behalf(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;

    // Without principal_author_id the request is underspecified.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&admin),
        json!({"title": "X", "area": "Y", "summary": "Z", "award_id": award.id}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    // With it, the chosen author becomes principal.
    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&admin),
        json!({
            "title": "X",
            "area": "Y",
            "summary": "Z",
            "award_id": award.id,
            "principal_author_id": author.id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["principal_author_id"], author.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_closed_award_rejects_submission(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let past = seed_award_with_phase(&pool, admin.id, "2001-01-01", "2001-12-31").await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&author),
        json!({"title": "X", "area": "Y", "summary": "Z", "award_id": past.id}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_author_set_must_resolve_to_authors(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let evaluator = seed_user(&pool, 3, Role::Evaluator).await;
    let award = seed_open_award(&pool, admin.id).await;

    // An evaluator id in the author set is rejected.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&author),
        json!({
            "title": "X", "area": "Y", "summary": "Z", "award_id": award.id,
            "author_ids": [evaluator.id],
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_AUTHORS").await;

    // So is an id that does not exist.
    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&author),
        json!({
            "title": "X", "area": "Y", "summary": "Z", "award_id": award.id,
            "author_ids": [999999],
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_AUTHORS").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_structural_update_until_locked(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;
    let project_id = create_project_via_api(&pool, &token_for(&author), award.id).await;

    // Editable while below the threshold.
    let app = build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&author),
        json!({"title": "Retitled"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Retitled");

    lock_project(&pool, project_id, 10).await;

    // Locked afterwards: structural mutation fails...
    let app = build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&author),
        json!({"title": "Too late"}),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "PROJECT_LOCKED").await;

    // ...but reading still succeeds and the title is unchanged.
    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["title"], "Retitled");
    assert_eq!(detail["evaluated"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_blocked_by_any_evaluation(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let evaluator = seed_user(&pool, 3, Role::Evaluator).await;
    let award = seed_open_award(&pool, admin.id).await;
    let project_id = create_project_via_api(&pool, &token_for(&author), award.id).await;

    // One evaluation: still editable, already undeletable.
    evaluate(&pool, &token_for(&evaluator), project_id, 8.0).await;

    let app = build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&author),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "HAS_EVALUATIONS").await;

    // A fresh project with no evaluations deletes cleanly.
    let other_id = create_project_via_api(&pool, &token_for(&author), award.id).await;
    let app = build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{other_id}"),
        &token_for(&author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_evaluated_listings_split_on_flag(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;
    let token = token_for(&author);

    let pending_id = create_project_via_api(&pool, &token, award.id).await;
    let locked_id = create_project_via_api(&pool, &token, award.id).await;
    lock_project(&pool, locked_id, 20).await;

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects/not-evaluated", &token).await;
    let pending = body_json(response).await;
    let ids: Vec<i64> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![pending_id]);

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects/evaluated", &token).await;
    let evaluated = body_json(response).await;
    let ids: Vec<i64> = evaluated
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![locked_id]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_winner_derivation_and_recompute(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;
    let author_token = token_for(&author);
    let admin_token = token_for(&admin);

    // Four projects with one evaluation each; a fifth with none.
    let mut project_ids = Vec::new();
    for (tag, score) in [(30, 6.0), (31, 9.5), (32, 8.0), (33, 7.0)] {
        let project_id = create_project_via_api(&pool, &author_token, award.id).await;
        let evaluator = seed_user(&pool, tag, Role::Evaluator).await;
        evaluate(&pool, &token_for(&evaluator), project_id, score).await;
        project_ids.push(project_id);
    }
    let unevaluated_id = create_project_via_api(&pool, &author_token, award.id).await;

    // Read path: top three by summed score, descending, never the
    // unevaluated project.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects/winners", &author_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let winners = body_json(response).await;
    let ranked: Vec<(i64, f64)> = winners
        .as_array()
        .unwrap()
        .iter()
        .map(|w| (w["id"].as_i64().unwrap(), w["total_score"].as_f64().unwrap()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (project_ids[1], 9.5),
            (project_ids[2], 8.0),
            (project_ids[3], 7.0),
        ]
    );
    assert!(ranked.iter().all(|(id, _)| *id != unevaluated_id));

    // Re-running with unchanged data returns the same order.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects/winners", &author_token).await;
    let again = body_json(response).await;
    assert_eq!(winners, again);

    // The winner flag is only written by the explicit recompute.
    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{}", project_ids[1]),
        &author_token,
    )
    .await;
    assert_eq!(body_json(response).await["winner"], false);

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        "/api/v1/projects/winners/recompute",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let recomputed = body_json(response).await;
    assert_eq!(
        recomputed["winner_ids"],
        json!([project_ids[1], project_ids[2], project_ids[3]])
    );

    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{}", project_ids[1]),
        &author_token,
    )
    .await;
    assert_eq!(body_json(response).await["winner"], true);

    // Recompute is admin-only.
    let app = build_test_app(pool);
    let response = post_auth(app, "/api/v1/projects/winners/recompute", &author_token).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_expansion_flags(pool: PgPool) {
    let admin = seed_user(&pool, 1, Role::Admin).await;
    let author = seed_user(&pool, 2, Role::Author).await;
    let award = seed_open_award(&pool, admin.id).await;
    let token = token_for(&author);
    create_project_via_api(&pool, &token, award.id).await;

    // Bare listing: no relations serialized.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects", &token).await;
    let bare = body_json(response).await;
    assert!(bare[0].get("authors").is_none());
    assert!(bare[0].get("evaluations").is_none());

    // Opt-in expansion.
    let app = build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/projects?with_authors=true&with_evaluations=true",
        &token,
    )
    .await;
    let expanded = body_json(response).await;
    assert_eq!(expanded[0]["authors"].as_array().unwrap().len(), 1);
    assert_eq!(expanded[0]["evaluations"].as_array().unwrap().len(), 0);
}
