//! Route definitions for the `/awards` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::award;
use crate::state::AppState;

/// Routes mounted at `/awards`.
///
/// ```text
/// GET    /      -> list_active (public; only currently-active awards)
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id (public; regardless of activity)
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin; blocked by associated projects)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(award::list_active).post(award::create))
        .route(
            "/{id}",
            get(award::get_by_id)
                .put(award::update)
                .delete(award::delete),
        )
}
