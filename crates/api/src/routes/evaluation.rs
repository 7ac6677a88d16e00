//! Route definitions for the `/evaluations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::evaluation;
use crate::state::AppState;

/// Routes mounted at `/evaluations`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> submit (evaluator; full admission pipeline)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (shape checks only)
/// DELETE /{id}  -> delete (ungated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(evaluation::list).post(evaluation::submit))
        .route(
            "/{id}",
            get(evaluation::get_by_id)
                .put(evaluation::update)
                .delete(evaluation::delete),
        )
}
