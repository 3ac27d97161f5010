//! Route definitions for film submissions.

use axum::routing::get;
use axum::Router;

use crate::handlers::submission;
use crate::state::AppState;

/// Mounted at `/submissions`.
///
/// ```text
/// GET    /                   -> list_submissions
/// POST   /                   -> create_submission
/// GET    /{id}               -> get_submission
/// PUT    /{id}               -> update_submission
/// DELETE /{id}               -> delete_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(submission::list_submissions).post(submission::create_submission))
        .route(
            "/{id}",
            get(submission::get_submission)
                .put(submission::update_submission)
                .delete(submission::delete_submission),
        )
}
