//! Handlers for session plans and their day / screen / slot hierarchy.
//!
//! Reads return the assembled [`Plan`](festival_core::session_plan::Plan)
//! tree. Child mutations return the affected node in the same shape the
//! client cache stores, so the client can splice it into its copy of the
//! tree without refetching.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use festival_core::error::CoreError;
use festival_core::session_plan::Slot;
use festival_core::types::DbId;
use festival_core::upload::{optional_text, require_text};
use festival_db::models::session_plan::{
    CreatePlanDay, CreatePlanScreen, CreateSessionPlan, SlotInput, UpdatePlanDay,
    UpdatePlanScreen, UpdateSessionPlan,
};
use festival_db::repositories::{PlanDayRepo, PlanScreenRepo, PlanSlotRepo, SessionPlanRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

fn plan_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SessionPlan",
        id,
    })
}

fn day_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Day", id })
}

fn screen_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Screen",
        id,
    })
}

fn slot_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Slot", id })
}

/// Trim every field of a slot form and check the required ones.
fn normalize_slot(input: SlotInput) -> Result<SlotInput, CoreError> {
    Ok(SlotInput {
        title: require_text("Title", &input.title)?,
        start_time: require_text("Start time", &input.start_time)?,
        end_time: optional_text(input.end_time.as_deref()),
        director: optional_text(input.director.as_deref()),
        moderator: optional_text(input.moderator.as_deref()),
        duration: optional_text(input.duration.as_deref()),
        category: optional_text(input.category.as_deref()),
        description: optional_text(input.description.as_deref()),
        order: input.order,
    })
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// GET /session-plans
///
/// List plan summaries (no days), most recent year first.
pub async fn list_plans(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let plans = SessionPlanRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /session-plans/{id}
///
/// The full plan tree.
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let plan = SessionPlanRepo::load_tree(&state.pool, id)
        .await?
        .ok_or_else(|| plan_not_found(id))?;
    Ok(Json(DataResponse { data: plan }))
}

/// POST /session-plans
pub async fn create_plan(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateSessionPlan>,
) -> AppResult<impl IntoResponse> {
    let input = CreateSessionPlan {
        festival: require_text("Festival", &input.festival)?,
        year: input.year,
    };
    let plan = SessionPlanRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = user.user_id, plan_id = plan.id, "Session plan created");

    let tree = plan.into_tree(Vec::new(), Vec::new(), Vec::new());
    Ok((StatusCode::CREATED, Json(DataResponse { data: tree })))
}

/// PUT /session-plans/{id}
///
/// Update the plan header; responds with the full tree.
pub async fn update_plan(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSessionPlan>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateSessionPlan {
        festival: match input.festival {
            Some(festival) => Some(require_text("Festival", &festival)?),
            None => None,
        },
        year: input.year,
    };
    SessionPlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| plan_not_found(id))?;
    let tree = SessionPlanRepo::load_tree(&state.pool, id)
        .await?
        .ok_or_else(|| plan_not_found(id))?;

    tracing::info!(user_id = user.user_id, plan_id = id, "Session plan updated");

    Ok(Json(DataResponse { data: tree }))
}

/// DELETE /session-plans/{id}
pub async fn delete_plan(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SessionPlanRepo::delete(&state.pool, id).await? {
        return Err(plan_not_found(id));
    }

    tracing::info!(user_id = user.user_id, plan_id = id, "Session plan deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

/// POST /session-plans/{id}/days
///
/// Responds with the new (empty) day node.
pub async fn add_day(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
    Json(input): Json<CreatePlanDay>,
) -> AppResult<impl IntoResponse> {
    SessionPlanRepo::find_by_id(&state.pool, plan_id)
        .await?
        .ok_or_else(|| plan_not_found(plan_id))?;

    let input = CreatePlanDay {
        day_number: input.day_number,
        date: require_text("Date", &input.date)?,
    };
    let day = PlanDayRepo::create(&state.pool, plan_id, &input).await?;

    tracing::info!(user_id = user.user_id, plan_id, day_id = day.id, "Day added");

    let node = day.into_node(&mut Vec::new(), &mut Vec::new());
    Ok((StatusCode::CREATED, Json(DataResponse { data: node })))
}

/// PUT /session-plans/{id}/days/{day_id}
///
/// Responds with the updated day, including its screens and slots.
pub async fn update_day(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((plan_id, day_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePlanDay>,
) -> AppResult<impl IntoResponse> {
    let input = UpdatePlanDay {
        day_number: input.day_number,
        date: match input.date {
            Some(date) => Some(require_text("Date", &date)?),
            None => None,
        },
    };
    let day = PlanDayRepo::update(&state.pool, plan_id, day_id, &input)
        .await?
        .ok_or_else(|| day_not_found(day_id))?;
    let node = PlanDayRepo::load_node(&state.pool, day).await?;

    tracing::info!(user_id = user.user_id, plan_id, day_id, "Day updated");

    Ok(Json(DataResponse { data: node }))
}

/// DELETE /session-plans/{id}/days/{day_id}
///
/// Removes the day with all of its screens and slots.
pub async fn delete_day(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path((plan_id, day_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !PlanDayRepo::delete(&state.pool, plan_id, day_id).await? {
        return Err(day_not_found(day_id));
    }

    tracing::info!(user_id = user.user_id, plan_id, day_id, "Day deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// POST /days/{day_id}/screens
pub async fn add_screen(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
    Json(input): Json<CreatePlanScreen>,
) -> AppResult<impl IntoResponse> {
    PlanDayRepo::find_by_id(&state.pool, day_id)
        .await?
        .ok_or_else(|| day_not_found(day_id))?;

    let input = CreatePlanScreen {
        screen_name: require_text("Screen name", &input.screen_name)?,
    };
    let screen = PlanScreenRepo::create(&state.pool, day_id, &input).await?;

    tracing::info!(user_id = user.user_id, day_id, screen_id = screen.id, "Screen added");

    let node = screen.into_node(&mut Vec::new());
    Ok((StatusCode::CREATED, Json(DataResponse { data: node })))
}

/// PUT /days/{day_id}/screens/{id}
///
/// Responds with the updated screen, including its slots.
pub async fn update_screen(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((day_id, screen_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePlanScreen>,
) -> AppResult<impl IntoResponse> {
    let input = UpdatePlanScreen {
        screen_name: match input.screen_name {
            Some(name) => Some(require_text("Screen name", &name)?),
            None => None,
        },
    };
    let screen = PlanScreenRepo::update(&state.pool, day_id, screen_id, &input)
        .await?
        .ok_or_else(|| screen_not_found(screen_id))?;
    let node = PlanScreenRepo::load_node(&state.pool, screen).await?;

    tracing::info!(user_id = user.user_id, day_id, screen_id, "Screen updated");

    Ok(Json(DataResponse { data: node }))
}

/// DELETE /days/{day_id}/screens/{id}
pub async fn delete_screen(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path((day_id, screen_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !PlanScreenRepo::delete(&state.pool, day_id, screen_id).await? {
        return Err(screen_not_found(screen_id));
    }

    tracing::info!(user_id = user.user_id, day_id, screen_id, "Screen deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// POST /screens/{screen_id}/slots
pub async fn add_slot(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(screen_id): Path<DbId>,
    Json(input): Json<SlotInput>,
) -> AppResult<impl IntoResponse> {
    PlanScreenRepo::find_by_id(&state.pool, screen_id)
        .await?
        .ok_or_else(|| screen_not_found(screen_id))?;

    let input = normalize_slot(input)?;
    let slot: Slot = PlanSlotRepo::create(&state.pool, screen_id, &input).await?;

    tracing::info!(user_id = user.user_id, screen_id, slot_id = slot.id, "Slot added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// PUT /screens/{screen_id}/slots/{id}
pub async fn update_slot(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((screen_id, slot_id)): Path<(DbId, DbId)>,
    Json(input): Json<SlotInput>,
) -> AppResult<impl IntoResponse> {
    let input = normalize_slot(input)?;
    let slot = PlanSlotRepo::update(&state.pool, screen_id, slot_id, &input)
        .await?
        .ok_or_else(|| slot_not_found(slot_id))?;

    tracing::info!(user_id = user.user_id, screen_id, slot_id, "Slot updated");

    Ok(Json(DataResponse { data: slot }))
}

/// DELETE /screens/{screen_id}/slots/{id}
pub async fn delete_slot(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path((screen_id, slot_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !PlanSlotRepo::delete(&state.pool, screen_id, slot_id).await? {
        return Err(slot_not_found(slot_id));
    }

    tracing::info!(user_id = user.user_id, screen_id, slot_id, "Slot deleted");

    Ok(StatusCode::NO_CONTENT)
}
