//! Handlers for curated gallery images.
//!
//! Every curated image belongs to a category and carries exactly one file.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::FileChange;
use festival_db::models::curated_image::{CreateCuratedImage, UpdateCuratedImage};
use festival_db::repositories::{CategoryRepo, CuratedImageRepo};

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_CURATED;

/// Query parameters for listing curated images.
#[derive(Debug, Deserialize)]
pub struct CuratedImageParams {
    pub category_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CuratedImage",
        id,
    })
}

async fn ensure_category(state: &AppState, category_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;
    Ok(())
}

/// GET /curated-images?category_id=
pub async fn list_curated_images(
    State(state): State<AppState>,
    Query(params): Query<CuratedImageParams>,
) -> AppResult<impl IntoResponse> {
    let images = CuratedImageRepo::list(&state.pool, params.category_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// GET /curated-images/{id}
pub async fn get_curated_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = CuratedImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: image }))
}

/// POST /curated-images (multipart: category_id, title, photographer, image)
pub async fn create_curated_image(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let category_id: DbId = form.required_number("category_id", "Category")?;
    let title = form.required("title", "Title")?;
    let photographer = form.optional("photographer");
    let file = form
        .take_file("image")
        .ok_or_else(|| CoreError::Validation("Image is required".to_string()))?;

    ensure_category(&state, category_id).await?;

    let image = state.storage.save(FOLDER_CURATED, &file).await?;
    let input = CreateCuratedImage {
        category_id,
        title,
        photographer,
        image: image.clone(),
    };
    let result = CuratedImageRepo::create(&state.pool, &input).await;
    let created = finish_create(&state.storage, &[image], result).await?;

    tracing::info!(
        user_id = user.user_id,
        curated_image_id = created.id,
        category_id,
        "Curated image created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /curated-images/{id} (multipart: category_id, title, photographer, image)
pub async fn update_curated_image(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let category_id: Option<DbId> = match form.text("category_id") {
        Some(_) => Some(form.required_number("category_id", "Category")?),
        None => None,
    };
    let title = form.required_if_present("title", "Title")?;
    let photographer = form.optional_if_present("photographer");
    let file = FileChange::from_option(form.take_file("image"));

    let existing = CuratedImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(category_id) = category_id {
        ensure_category(&state, category_id).await?;
    }

    let new_image = state
        .storage
        .save_optional(FOLDER_CURATED, file.new_file())
        .await?;
    let input = UpdateCuratedImage {
        category_id,
        title,
        photographer,
        image: new_image.clone(),
    };
    let result = CuratedImageRepo::update(&state.pool, id, &input).await;
    let updated = finish_update(&state.storage, new_image.as_slice(), result, not_found(id)).await?;

    if new_image.is_some() {
        state.storage.remove(&existing.image).await;
    }

    tracing::info!(user_id = user.user_id, curated_image_id = id, "Curated image updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /curated-images/{id}
pub async fn delete_curated_image(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = CuratedImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !CuratedImageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    state.storage.remove(&existing.image).await;

    tracing::info!(user_id = user.user_id, curated_image_id = id, "Curated image deleted");

    Ok(StatusCode::NO_CONTENT)
}
