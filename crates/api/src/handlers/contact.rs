//! Handlers for contact messages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_db::models::contact::{CreateContact, SetContacted};
use festival_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

/// GET /contacts
pub async fn list_contacts(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /contacts (public)
pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContact>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let contact = ContactRepo::create(&state.pool, &input).await?;

    tracing::info!(contact_id = contact.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// PATCH /contacts/{id}/contacted
///
/// Idempotent: setting the flag to its current value succeeds unchanged.
pub async fn set_contacted(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetContacted>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::set_contacted(&state.pool, id, input.contacted)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        user_id = user.user_id,
        contact_id = id,
        contacted = contact.contacted,
        "Contact follow-up updated"
    );

    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /contacts/{id}
pub async fn delete_contact(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = user.user_id, contact_id = id, "Contact deleted");

    Ok(StatusCode::NO_CONTENT)
}
