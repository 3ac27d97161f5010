//! Handlers for awards and their nominations.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::upload::{optional_text, require_text, FileChange};
use festival_db::models::award::{CreateAward, CreateNomination, UpdateAward, UpdateNomination};
use festival_db::repositories::{AwardRepo, NominationRepo};

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::handlers::{finish_create, finish_update};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::FOLDER_AWARDS;

fn award_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Award",
        id,
    })
}

fn nomination_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Nomination",
        id,
    })
}

// ---------------------------------------------------------------------------
// Awards
// ---------------------------------------------------------------------------

/// GET /awards
pub async fn list_awards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let awards = AwardRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: awards }))
}

/// GET /awards/{id}
pub async fn get_award(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let award = AwardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| award_not_found(id))?;
    Ok(Json(DataResponse { data: award }))
}

/// POST /awards (multipart: title, year, description, image)
///
/// A `year` that is not a number is stored as zero.
pub async fn create_award(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required("title", "Title")?;
    let year = form.number_or_zero::<i32>("year");
    let description = form.optional("description");
    let file = form.take_file("image");

    let image = state
        .storage
        .save_optional(FOLDER_AWARDS, file.as_ref())
        .await?;
    let input = CreateAward {
        title,
        year,
        description,
        image: image.clone(),
    };
    let result = AwardRepo::create(&state.pool, &input).await;
    let award = finish_create(&state.storage, image.as_slice(), result).await?;

    tracing::info!(user_id = user.user_id, award_id = award.id, "Award created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: award })))
}

/// PUT /awards/{id} (multipart, all fields optional)
pub async fn update_award(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = MultipartForm::parse(multipart).await?;
    let title = form.required_if_present("title", "Title")?;
    let year = form.number_if_present::<i32>("year");
    let description = form.optional_if_present("description");
    let file = FileChange::from_option(form.take_file("image"));

    let existing = AwardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| award_not_found(id))?;

    let new_image = state
        .storage
        .save_optional(FOLDER_AWARDS, file.new_file())
        .await?;
    let input = UpdateAward {
        title,
        year,
        description,
        image: new_image.clone(),
    };
    let result = AwardRepo::update(&state.pool, id, &input).await;
    let updated =
        finish_update(&state.storage, new_image.as_slice(), result, award_not_found(id)).await?;

    if new_image.is_some() {
        if let Some(old) = &existing.image {
            state.storage.remove(old).await;
        }
    }

    tracing::info!(user_id = user.user_id, award_id = id, "Award updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /awards/{id}
///
/// Nominations go with the award.
pub async fn delete_award(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = AwardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| award_not_found(id))?;

    if !AwardRepo::delete(&state.pool, id).await? {
        return Err(award_not_found(id));
    }
    if let Some(image) = &existing.image {
        state.storage.remove(image).await;
    }

    tracing::info!(user_id = user.user_id, award_id = id, "Award deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Nominations
// ---------------------------------------------------------------------------

/// GET /awards/{id}/nominations
pub async fn list_nominations(
    State(state): State<AppState>,
    Path(award_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    AwardRepo::find_by_id(&state.pool, award_id)
        .await?
        .ok_or_else(|| award_not_found(award_id))?;

    let nominations = NominationRepo::list_by_award(&state.pool, award_id).await?;
    Ok(Json(DataResponse { data: nominations }))
}

/// POST /awards/{id}/nominations
///
/// The award comes from the path; any `award_id` in the body is ignored.
pub async fn create_nomination(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(award_id): Path<DbId>,
    Json(input): Json<CreateNomination>,
) -> AppResult<impl IntoResponse> {
    AwardRepo::find_by_id(&state.pool, award_id)
        .await?
        .ok_or_else(|| award_not_found(award_id))?;

    let input = CreateNomination {
        award_id,
        nominee: require_text("Nominee", &input.nominee)?,
        film_title: require_text("Film title", &input.film_title)?,
        category: optional_text(input.category.as_deref()),
        is_winner: input.is_winner,
    };
    let nomination = NominationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        award_id,
        nomination_id = nomination.id,
        "Nomination created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: nomination })))
}

/// PUT /nominations/{id}
pub async fn update_nomination(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNomination>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateNomination {
        nominee: input
            .nominee
            .map(|n| require_text("Nominee", &n))
            .transpose()?,
        film_title: input
            .film_title
            .map(|t| require_text("Film title", &t))
            .transpose()?,
        category: input.category.map(|c| optional_text(c.as_deref())),
        is_winner: input.is_winner,
    };
    let nomination = NominationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| nomination_not_found(id))?;

    tracing::info!(user_id = user.user_id, nomination_id = id, "Nomination updated");

    Ok(Json(DataResponse { data: nomination }))
}

/// DELETE /nominations/{id}
pub async fn delete_nomination(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !NominationRepo::delete(&state.pool, id).await? {
        return Err(nomination_not_found(id));
    }

    tracing::info!(user_id = user.user_id, nomination_id = id, "Nomination deleted");

    Ok(StatusCode::NO_CONTENT)
}
