//! Route definitions for session plans.
//!
//! Days are addressed through their plan; screens and slots through their
//! immediate parent, so every child route names the branch it touches.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::session_plan;
use crate::state::AppState;

/// Mounted at `/session-plans`.
///
/// ```text
/// GET    /                        -> list_plans
/// POST   /                        -> create_plan
/// GET    /{id}                    -> get_plan
/// PUT    /{id}                    -> update_plan
/// DELETE /{id}                    -> delete_plan
/// POST   /{id}/days               -> add_day
/// PUT    /{id}/days/{day_id}      -> update_day
/// DELETE /{id}/days/{day_id}      -> delete_day
/// ```
pub fn plans_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(session_plan::list_plans).post(session_plan::create_plan),
        )
        .route(
            "/{id}",
            get(session_plan::get_plan)
                .put(session_plan::update_plan)
                .delete(session_plan::delete_plan),
        )
        .route("/{id}/days", post(session_plan::add_day))
        .route(
            "/{id}/days/{day_id}",
            put(session_plan::update_day).delete(session_plan::delete_day),
        )
}

/// Mounted at `/days`.
///
/// ```text
/// POST   /{day_id}/screens        -> add_screen
/// PUT    /{day_id}/screens/{id}   -> update_screen
/// DELETE /{day_id}/screens/{id}   -> delete_screen
/// ```
pub fn days_router() -> Router<AppState> {
    Router::new()
        .route("/{day_id}/screens", post(session_plan::add_screen))
        .route(
            "/{day_id}/screens/{id}",
            put(session_plan::update_screen).delete(session_plan::delete_screen),
        )
}

/// Mounted at `/screens`.
///
/// ```text
/// POST   /{screen_id}/slots       -> add_slot
/// PUT    /{screen_id}/slots/{id}  -> update_slot
/// DELETE /{screen_id}/slots/{id}  -> delete_slot
/// ```
pub fn screens_router() -> Router<AppState> {
    Router::new()
        .route("/{screen_id}/slots", post(session_plan::add_slot))
        .route(
            "/{screen_id}/slots/{id}",
            put(session_plan::update_slot).delete(session_plan::delete_slot),
        )
}
