pub mod about_item;
pub mod award;
pub mod category;
pub mod contact;
pub mod curated_image;
pub mod event;
pub mod health;
pub mod registration;
pub mod session_plan;
pub mod submission;
pub mod workshop;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Reads of published content are public; inbound records (submissions,
/// registrations, contacts) are accepted publicly but only editors can read
/// them. Creating and editing needs an editor, deleting needs an admin.
///
/// ```text
/// /session-plans                                   list, create
/// /session-plans/{id}                              tree, update, delete
/// /session-plans/{id}/days                         add day
/// /session-plans/{id}/days/{day_id}                update, delete day
/// /days/{day_id}/screens                           add screen
/// /days/{day_id}/screens/{id}                      update, delete screen
/// /screens/{screen_id}/slots                       add slot
/// /screens/{screen_id}/slots/{id}                  update, delete slot
///
/// /categories                                      list, create (multipart)
/// /categories/{id}                                 get, update (multipart), delete
/// /curated-images                                  list (?category_id), create (multipart)
/// /curated-images/{id}                             get, update (multipart), delete
///
/// /events                                          list, create (multipart)
/// /events/{id}                                     get, update (multipart), delete
/// /workshops                                       list, create (multipart)
/// /workshops/{id}                                  get, update (multipart), delete
/// /about-items                                     list, create (multipart)
/// /about-items/{id}                                get, update (multipart), delete
/// /awards                                          list, create (multipart)
/// /awards/{id}                                     get, update (multipart), delete
/// /awards/{id}/nominations                         list, create
/// /nominations/{id}                                update, delete
///
/// /submissions                                     list (editor), create (public)
/// /submissions/{id}                                get, update, delete
/// /registrations                                   list (editor), create (public)
/// /registrations/{id}                              delete
/// /contacts                                        list (editor), create (public)
/// /contacts/{id}                                   delete
/// /contacts/{id}/contacted                         set follow-up flag (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/session-plans", session_plan::plans_router())
        .nest("/days", session_plan::days_router())
        .nest("/screens", session_plan::screens_router())
        .nest("/categories", category::router())
        .nest("/curated-images", curated_image::router())
        .nest("/events", event::router())
        .nest("/workshops", workshop::router())
        .nest("/about-items", about_item::router())
        .nest("/awards", award::awards_router())
        .nest("/nominations", award::nominations_router())
        .nest("/submissions", submission::router())
        .nest("/registrations", registration::router())
        .nest("/contacts", contact::router())
}
