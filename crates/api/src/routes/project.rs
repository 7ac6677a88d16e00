//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                    -> list (?with_authors=&with_evaluations=)
/// POST   /                    -> create (author, or admin on behalf)
/// GET    /not-evaluated       -> list_not_evaluated
/// GET    /evaluated           -> list_evaluated
/// GET    /winners             -> list_winners (derived at read time)
/// POST   /winners/recompute   -> recompute_winners (admin)
/// GET    /{id}                -> get_by_id (full expansion)
/// PUT    /{id}                -> update (lock-gated)
/// DELETE /{id}                -> delete (blocked by evaluations)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/not-evaluated", get(project::list_not_evaluated))
        .route("/evaluated", get(project::list_evaluated))
        .route("/winners", get(project::list_winners))
        .route("/winners/recompute", post(project::recompute_winners))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}
