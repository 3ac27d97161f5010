//! Route definitions for contact messages.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Mounted at `/contacts`.
///
/// ```text
/// GET    /                   -> list_contacts
/// POST   /                   -> create_contact
/// DELETE /{id}               -> delete_contact
/// PATCH  /{id}/contacted     -> set_contacted
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list_contacts).post(contact::create_contact))
        .route("/{id}", delete(contact::delete_contact))
        .route("/{id}/contacted", patch(contact::set_contacted))
}
