//! Route definitions for curated gallery images.

use axum::routing::get;
use axum::Router;

use crate::handlers::curated_image;
use crate::state::AppState;

/// Mounted at `/curated-images`.
///
/// ```text
/// GET    /                   -> list_curated_images (?category_id)
/// POST   /                   -> create_curated_image
/// GET    /{id}               -> get_curated_image
/// PUT    /{id}               -> update_curated_image
/// DELETE /{id}               -> delete_curated_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(curated_image::list_curated_images).post(curated_image::create_curated_image))
        .route(
            "/{id}",
            get(curated_image::get_curated_image)
                .put(curated_image::update_curated_image)
                .delete(curated_image::delete_curated_image),
        )
}
