//! Route definitions for awards and nominations.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::award;
use crate::state::AppState;

/// Mounted at `/awards`.
///
/// ```text
/// GET    /                   -> list_awards
/// POST   /                   -> create_award
/// GET    /{id}               -> get_award
/// PUT    /{id}               -> update_award
/// DELETE /{id}               -> delete_award
/// GET    /{id}/nominations   -> list_nominations
/// POST   /{id}/nominations   -> create_nomination
/// ```
pub fn awards_router() -> Router<AppState> {
    Router::new()
        .route("/", get(award::list_awards).post(award::create_award))
        .route(
            "/{id}",
            get(award::get_award)
                .put(award::update_award)
                .delete(award::delete_award),
        )
        .route(
            "/{id}/nominations",
            get(award::list_nominations).post(award::create_nomination),
        )
}

/// Mounted at `/nominations`.
///
/// ```text
/// PUT    /{id}               -> update_nomination
/// DELETE /{id}               -> delete_nomination
/// ```
pub fn nominations_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(award::update_nomination).delete(award::delete_nomination),
    )
}
