//! Handlers for about-page items.
//!
//! An about item holds an ordered list of up to
//! [`MAX_IMAGES_PER_ITEM`](festival_core::upload::MAX_IMAGES_PER_ITEM)
//! images. Updates drop images by index (`remove_indices`) and append new
//! `images` files in one request; the combined count is checked before any
//! file is written.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::{check_image_count, ImageSetEdit};
use festival_db::models::about_item::{CreateAboutItem, UpdateAboutItem};
use festival_db::repositories::AboutItemRepo;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_ABOUT;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AboutItem",
        id,
    })
}

/// GET /about-items
pub async fn list_about_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = AboutItemRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /about-items/{id}
pub async fn get_about_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = AboutItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /about-items (multipart: title, body, images[])
pub async fn create_about_item(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required("title", "Title")?;
    let body = form.optional("body");
    let files = form.take_files("images");
    check_image_count(files.len())?;

    let images = state.storage.save_all(FOLDER_ABOUT, &files).await?;
    let input = CreateAboutItem {
        title,
        body,
        images: images.clone(),
    };
    let result = AboutItemRepo::create(&state.pool, &input).await;
    let item = finish_create(&state.storage, &images, result).await?;

    tracing::info!(
        user_id = user.user_id,
        about_item_id = item.id,
        image_count = item.images.len(),
        "About item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /about-items/{id} (multipart: title, body, remove_indices, images[])
///
/// `remove_indices` is a JSON array of positions in the current image list.
/// Kept images stay in order and new files are appended after them. The
/// removed files are deleted once the row is updated.
pub async fn update_about_item(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required_if_present("title", "Title")?;
    let body = form.text("body").map(|b| b.trim().to_string());
    let remove_indices = form.remove_indices()?;
    let added = form.take_files("images");

    let existing = AboutItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let plan = ImageSetEdit {
        existing: existing.images,
        remove_indices,
        added,
    }
    .plan()?;

    let images_changed = !plan.removed.is_empty() || !plan.added.is_empty();
    let new_paths = state.storage.save_all(FOLDER_ABOUT, &plan.added).await?;

    let input = UpdateAboutItem {
        title,
        body,
        images: images_changed.then(|| {
            plan.kept
                .iter()
                .cloned()
                .chain(new_paths.iter().cloned())
                .collect()
        }),
    };
    let result = AboutItemRepo::update(&state.pool, id, &input).await;
    let updated = finish_update(&state.storage, &new_paths, result, not_found(id)).await?;

    state.storage.remove_all(&plan.removed).await;

    tracing::info!(
        user_id = user.user_id,
        about_item_id = id,
        removed = plan.removed.len(),
        added = new_paths.len(),
        "About item updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /about-items/{id}
pub async fn delete_about_item(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = AboutItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !AboutItemRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    state.storage.remove_all(&existing.images).await;

    tracing::info!(user_id = user.user_id, about_item_id = id, "About item deleted");

    Ok(StatusCode::NO_CONTENT)
}
