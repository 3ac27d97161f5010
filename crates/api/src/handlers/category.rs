//! Handlers for gallery categories.
//!
//! Create and update take multipart forms with an optional `cover_image`
//! file. A category that still has curated images cannot be deleted.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::FileChange;
use festival_db::models::category::{CreateCategory, UpdateCategory};
use festival_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_CATEGORIES;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /categories (multipart: name, description, cover_image)
pub async fn create_category(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let name = form.required("name", "Name")?;
    let description = form.optional("description");
    let cover = form.take_file("cover_image");

    let cover_image = state
        .storage
        .save_optional(FOLDER_CATEGORIES, cover.as_ref())
        .await?;

    let input = CreateCategory {
        name,
        description,
        cover_image: cover_image.clone(),
    };
    let result = CategoryRepo::create(&state.pool, &input).await;
    let category = finish_create(&state.storage, cover_image.as_slice(), result).await?;

    tracing::info!(user_id = user.user_id, category_id = category.id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /categories/{id} (multipart: name, description, cover_image)
///
/// Omitted fields keep their stored value; a new cover replaces the old
/// file, which is removed once the row is updated.
pub async fn update_category(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let name = form.required_if_present("name", "Name")?;
    let description = form.optional_if_present("description");
    let cover = FileChange::from_option(form.take_file("cover_image"));

    let existing = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let new_cover = state
        .storage
        .save_optional(FOLDER_CATEGORIES, cover.new_file())
        .await?;

    let input = UpdateCategory {
        name,
        description,
        cover_image: new_cover.clone(),
    };
    let result = CategoryRepo::update(&state.pool, id, &input).await;
    let updated = finish_update(&state.storage, new_cover.as_slice(), result, not_found(id)).await?;

    if new_cover.is_some() {
        if let Some(old) = &existing.cover_image {
            state.storage.remove(old).await;
        }
    }

    tracing::info!(user_id = user.user_id, category_id = id, "Category updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /categories/{id}
///
/// Rejected with 409 while curated images still belong to the category.
pub async fn delete_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let image_count = CategoryRepo::count_images(&state.pool, id).await?;
    if image_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category '{}' still has {image_count} image(s). Move or delete them first",
            category.name
        ))));
    }

    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(cover) = &category.cover_image {
        state.storage.remove(cover).await;
    }

    tracing::info!(user_id = user.user_id, category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
