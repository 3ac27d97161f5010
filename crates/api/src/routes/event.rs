//! Route definitions for festival events.

use axum::routing::get;
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Mounted at `/events`.
///
/// ```text
/// GET    /                   -> list_events
/// POST   /                   -> create_event
/// GET    /{id}               -> get_event
/// PUT    /{id}               -> update_event
/// DELETE /{id}               -> delete_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list_events).post(event::create_event))
        .route(
            "/{id}",
            get(event::get_event)
                .put(event::update_event)
                .delete(event::delete_event),
        )
}
