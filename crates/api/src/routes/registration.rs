//! Route definitions for workshop registrations.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Mounted at `/registrations`.
///
/// ```text
/// GET    /                   -> list_registrations
/// POST   /                   -> create_registration
/// DELETE /{id}               -> delete_registration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(registration::list_registrations).post(registration::create_registration),
        )
        .route("/{id}", delete(registration::delete_registration))
}
