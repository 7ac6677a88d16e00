//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /            -> register (public)
/// GET    /authors     -> list_authors
/// GET    /evaluators  -> list_evaluators
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update (self or admin)
/// DELETE /{id}        -> delete (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::register))
        .route("/authors", get(user::list_authors))
        .route("/evaluators", get(user::list_evaluators))
        .route(
            "/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
}
