//! Handlers for festival events.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::FileChange;
use festival_db::models::event::{CreateEvent, UpdateEvent};
use festival_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_EVENTS;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Event",
        id,
    })
}

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /events (multipart: title, description, venue, event_date, image)
pub async fn create_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required("title", "Title")?;
    let event_date = form.required_date("event_date", "Event date")?;
    let description = form.optional("description");
    let venue = form.optional("venue");
    let file = form.take_file("image");

    let image = state
        .storage
        .save_optional(FOLDER_EVENTS, file.as_ref())
        .await?;
    let input = CreateEvent {
        title,
        description,
        venue,
        event_date,
        image: image.clone(),
    };
    let result = EventRepo::create(&state.pool, &input).await;
    let event = finish_create(&state.storage, image.as_slice(), result).await?;

    tracing::info!(user_id = user.user_id, event_id = event.id, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /events/{id} (multipart, all fields optional)
pub async fn update_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required_if_present("title", "Title")?;
    let event_date = form.date_if_present("event_date", "Event date")?;
    let description = form.optional_if_present("description");
    let venue = form.optional_if_present("venue");
    let file = FileChange::from_option(form.take_file("image"));

    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let new_image = state
        .storage
        .save_optional(FOLDER_EVENTS, file.new_file())
        .await?;
    let input = UpdateEvent {
        title,
        description,
        venue,
        event_date,
        image: new_image.clone(),
    };
    let result = EventRepo::update(&state.pool, id, &input).await;
    let updated = finish_update(&state.storage, new_image.as_slice(), result, not_found(id)).await?;

    if new_image.is_some() {
        if let Some(old) = &existing.image {
            state.storage.remove(old).await;
        }
    }

    tracing::info!(user_id = user.user_id, event_id = id, "Event updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /events/{id}
pub async fn delete_event(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !EventRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(image) = &existing.image {
        state.storage.remove(image).await;
    }

    tracing::info!(user_id = user.user_id, event_id = id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}
