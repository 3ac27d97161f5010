//! Handlers for workshop registrations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_db::models::registration::CreateRegistration;
use festival_db::repositories::{RegistrationRepo, WorkshopRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /registrations
pub async fn list_registrations(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let registrations = RegistrationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// POST /registrations (public)
pub async fn create_registration(
    State(state): State<AppState>,
    Json(input): Json<CreateRegistration>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(workshop_id) = input.workshop_id {
        WorkshopRepo::find_by_id(&state.pool, workshop_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Workshop",
                id: workshop_id,
            }))?;
    }

    let registration = RegistrationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        registration_id = registration.id,
        workshop_id = ?registration.workshop_id,
        "Registration received"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// DELETE /registrations/{id}
pub async fn delete_registration(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !RegistrationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, registration_id = id, "Registration deleted");

    Ok(StatusCode::NO_CONTENT)
}
