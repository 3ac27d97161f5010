//! Route definitions for workshops.

use axum::routing::get;
use axum::Router;

use crate::handlers::workshop;
use crate::state::AppState;

/// Mounted at `/workshops`.
///
/// ```text
/// GET    /                   -> list_workshops
/// POST   /                   -> create_workshop
/// GET    /{id}               -> get_workshop
/// PUT    /{id}               -> update_workshop
/// DELETE /{id}               -> delete_workshop
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workshop::list_workshops).post(workshop::create_workshop))
        .route(
            "/{id}",
            get(workshop::get_workshop)
                .put(workshop::update_workshop)
                .delete(workshop::delete_workshop),
        )
}
