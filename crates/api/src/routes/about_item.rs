//! Route definitions for about-page items.

use axum::routing::get;
use axum::Router;

use crate::handlers::about_item;
use crate::state::AppState;

/// Mounted at `/about-items`.
///
/// ```text
/// GET    /                   -> list_about_items
/// POST   /                   -> create_about_item
/// GET    /{id}               -> get_about_item
/// PUT    /{id}               -> update_about_item
/// DELETE /{id}               -> delete_about_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(about_item::list_about_items).post(about_item::create_about_item))
        .route(
            "/{id}",
            get(about_item::get_about_item)
                .put(about_item::update_about_item)
                .delete(about_item::delete_about_item),
        )
}
