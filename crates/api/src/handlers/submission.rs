//! Handlers for film submissions.
//!
//! Submitting is public; reviewing (list, read, status changes) needs an
//! editor and deleting needs an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use festival_core::error::CoreError;
use festival_core::status::validate_submission_status;
use festival_core::types::DbId;
use festival_core::upload::optional_text;
use festival_db::models::submission::{CreateSubmission, UpdateSubmission};
use festival_db::repositories::SubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Submission",
        id,
    })
}

/// GET /submissions
pub async fn list_submissions(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let submissions = SubmissionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /submissions/{id}
pub async fn get_submission(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: submission }))
}

/// POST /submissions (public)
pub async fn create_submission(
    State(state): State<AppState>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let submission = SubmissionRepo::create(&state.pool, &input).await?;

    tracing::info!(submission_id = submission.id, "Submission received");

    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

/// PUT /submissions/{id}
pub async fn update_submission(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubmission>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(status) = &input.status {
        validate_submission_status(status)?;
    }
    let input = UpdateSubmission {
        phone: blank_to_null(input.phone),
        country: blank_to_null(input.country),
        category: blank_to_null(input.category),
        synopsis: blank_to_null(input.synopsis),
        ..input
    };

    let submission = SubmissionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        user_id = user.user_id,
        submission_id = id,
        status = %submission.status,
        "Submission updated"
    );

    Ok(Json(DataResponse { data: submission }))
}

/// A sent blank string clears the column like an explicit null.
fn blank_to_null(change: Option<Option<String>>) -> Option<Option<String>> {
    change.map(|value| optional_text(value.as_deref()))
}

/// DELETE /submissions/{id}
pub async fn delete_submission(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SubmissionRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = user.user_id, submission_id = id, "Submission deleted");

    Ok(StatusCode::NO_CONTENT)
}
