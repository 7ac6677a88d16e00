//! Route tree.

pub mod auth;
pub mod award;
pub mod evaluation;
pub mod health;
pub mod project;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                    login (public)
///
/// /users                         register (public)
/// /users/authors                 authors listing
/// /users/evaluators              evaluators listing
/// /users/{id}                    get, update, delete
///
/// /awards                        active listing (public), create (admin)
/// /awards/{id}                   get (public), update, delete (admin)
///
/// /projects                      list, create
/// /projects/not-evaluated        pending projects
/// /projects/evaluated            closed projects
/// /projects/winners              derived top three
/// /projects/winners/recompute    persist winner flags (admin)
/// /projects/{id}                 get, update, delete
///
/// /evaluations                   list, submit (evaluator)
/// /evaluations/{id}              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/awards", award::router())
        .nest("/projects", project::router())
        .nest("/evaluations", evaluation::router())
}
