//! Handlers for workshops.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::FileChange;
use festival_db::models::workshop::{CreateWorkshop, UpdateWorkshop};
use festival_db::repositories::WorkshopRepo;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_WORKSHOPS;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workshop",
        id,
    })
}

/// GET /workshops
pub async fn list_workshops(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workshops = WorkshopRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: workshops }))
}

/// GET /workshops/{id}
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workshop = WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: workshop }))
}

/// POST /workshops (multipart: title, instructor, description, workshop_date, seats, image)
///
/// A `seats` value that is not a number is stored as zero.
pub async fn create_workshop(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required("title", "Title")?;
    let workshop_date = form.required_date("workshop_date", "Workshop date")?;
    let instructor = form.optional("instructor");
    let description = form.optional("description");
    let seats = form.number_or_zero::<i32>("seats").max(0);
    let file = form.take_file("image");

    let image = state
        .storage
        .save_optional(FOLDER_WORKSHOPS, file.as_ref())
        .await?;
    let input = CreateWorkshop {
        title,
        instructor,
        description,
        workshop_date,
        seats: Some(seats),
        image: image.clone(),
    };
    let result = WorkshopRepo::create(&state.pool, &input).await;
    let workshop = finish_create(&state.storage, image.as_slice(), result).await?;

    tracing::info!(user_id = user.user_id, workshop_id = workshop.id, "Workshop created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: workshop })))
}

/// PUT /workshops/{id} (multipart, all fields optional)
pub async fn update_workshop(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required_if_present("title", "Title")?;
    let workshop_date = form.date_if_present("workshop_date", "Workshop date")?;
    let instructor = form.optional_if_present("instructor");
    let description = form.optional_if_present("description");
    let seats = form.number_if_present::<i32>("seats").map(|s| s.max(0));
    let file = FileChange::from_option(form.take_file("image"));

    let existing = WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let new_image = state
        .storage
        .save_optional(FOLDER_WORKSHOPS, file.new_file())
        .await?;
    let input = UpdateWorkshop {
        title,
        instructor,
        description,
        workshop_date,
        seats,
        image: new_image.clone(),
    };
    let result = WorkshopRepo::update(&state.pool, id, &input).await;
    let updated = finish_update(&state.storage, new_image.as_slice(), result, not_found(id)).await?;

    if new_image.is_some() {
        if let Some(old) = &existing.image {
            state.storage.remove(old).await;
        }
    }

    tracing::info!(user_id = user.user_id, workshop_id = id, "Workshop updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /workshops/{id}
///
/// Registrations for the workshop are kept with their workshop cleared.
pub async fn delete_workshop(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !WorkshopRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(image) = &existing.image {
        state.storage.remove(image).await;
    }

    tracing::info!(user_id = user.user_id, workshop_id = id, "Workshop deleted");

    Ok(StatusCode::NO_CONTENT)
}
