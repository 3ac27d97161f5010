//! Repositories for the session plan tables.
//!
//! Every child mutation is scoped by its parent id as well as its own id, so
//! a request addressed through the wrong plan, day or screen finds nothing
//! instead of touching another branch.

use festival_core::session_plan::{Day, Plan, Screen, Slot};
use festival_core::types::DbId;
use sqlx::PgPool;

use crate::models::session_plan::{
    CreatePlanDay, CreatePlanScreen, CreateSessionPlan, PlanDay, PlanScreen, PlanSlot,
    SessionPlan, SlotInput, UpdatePlanDay, UpdatePlanScreen, UpdateSessionPlan,
};

const PLAN_COLUMNS: &str = "id, festival, year, created_at, updated_at";
const DAY_COLUMNS: &str = "id, plan_id, day_number, date_label";
const SCREEN_COLUMNS: &str = "id, day_id, screen_name";
const SLOT_COLUMNS: &str = "id, screen_id, title, start_time, end_time, director, moderator, \
                            duration, category, description, sort_order";

/// Slot display order: explicit `sort_order` first, then insertion order.
const SLOT_ORDER: &str = "sort_order ASC NULLS LAST, id ASC";

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// CRUD for `session_plans` plus whole-tree loading.
pub struct SessionPlanRepo;

impl SessionPlanRepo {
    /// List plan headers, newest festival year first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SessionPlan>, sqlx::Error> {
        let query =
            format!("SELECT {PLAN_COLUMNS} FROM session_plans ORDER BY year DESC, festival ASC");
        sqlx::query_as::<_, SessionPlan>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SessionPlan>, sqlx::Error> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM session_plans WHERE id = $1");
        sqlx::query_as::<_, SessionPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateSessionPlan,
    ) -> Result<SessionPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO session_plans (festival, year)
             VALUES ($1, $2)
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, SessionPlan>(&query)
            .bind(&input.festival)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSessionPlan,
    ) -> Result<Option<SessionPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE session_plans SET
                festival = COALESCE($2, festival),
                year = COALESCE($3, year),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, SessionPlan>(&query)
            .bind(id)
            .bind(&input.festival)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan and, by cascade, all of its days, screens and slots.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a plan with every day, screen and slot beneath it.
    pub async fn load_tree(pool: &PgPool, id: DbId) -> Result<Option<Plan>, sqlx::Error> {
        let Some(plan) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let days = PlanDayRepo::list_by_plan(pool, id).await?;
        let day_ids: Vec<DbId> = days.iter().map(|d| d.id).collect();
        let screens = PlanScreenRepo::list_by_days(pool, &day_ids).await?;
        let screen_ids: Vec<DbId> = screens.iter().map(|s| s.id).collect();
        let slots = PlanSlotRepo::list_by_screens(pool, &screen_ids).await?;

        tracing::debug!(
            plan_id = id,
            days = days.len(),
            screens = screens.len(),
            slots = slots.len(),
            "Loaded session plan tree"
        );

        Ok(Some(plan.into_tree(days, screens, slots)))
    }
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

/// CRUD for `plan_days`, scoped by plan.
pub struct PlanDayRepo;

impl PlanDayRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlanDay>, sqlx::Error> {
        let query = format!("SELECT {DAY_COLUMNS} FROM plan_days WHERE id = $1");
        sqlx::query_as::<_, PlanDay>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_plan(pool: &PgPool, plan_id: DbId) -> Result<Vec<PlanDay>, sqlx::Error> {
        let query = format!("SELECT {DAY_COLUMNS} FROM plan_days WHERE plan_id = $1 ORDER BY id");
        sqlx::query_as::<_, PlanDay>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        plan_id: DbId,
        input: &CreatePlanDay,
    ) -> Result<PlanDay, sqlx::Error> {
        let query = format!(
            "INSERT INTO plan_days (plan_id, day_number, date_label)
             VALUES ($1, $2, $3)
             RETURNING {DAY_COLUMNS}"
        );
        sqlx::query_as::<_, PlanDay>(&query)
            .bind(plan_id)
            .bind(input.day_number)
            .bind(&input.date)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        plan_id: DbId,
        id: DbId,
        input: &UpdatePlanDay,
    ) -> Result<Option<PlanDay>, sqlx::Error> {
        let query = format!(
            "UPDATE plan_days SET
                day_number = COALESCE($3, day_number),
                date_label = COALESCE($4, date_label),
                updated_at = NOW()
             WHERE id = $1 AND plan_id = $2
             RETURNING {DAY_COLUMNS}"
        );
        sqlx::query_as::<_, PlanDay>(&query)
            .bind(id)
            .bind(plan_id)
            .bind(input.day_number)
            .bind(&input.date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a day together with its screens and slots.
    pub async fn delete(pool: &PgPool, plan_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plan_days WHERE id = $1 AND plan_id = $2")
            .bind(id)
            .bind(plan_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a single day as a tree node, including its screens and slots.
    pub async fn load_node(pool: &PgPool, day: PlanDay) -> Result<Day, sqlx::Error> {
        let mut screens = PlanScreenRepo::list_by_days(pool, &[day.id]).await?;
        let screen_ids: Vec<DbId> = screens.iter().map(|s| s.id).collect();
        let mut slots = PlanSlotRepo::list_by_screens(pool, &screen_ids).await?;
        Ok(day.into_node(&mut screens, &mut slots))
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// CRUD for `plan_screens`, scoped by day.
pub struct PlanScreenRepo;

impl PlanScreenRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlanScreen>, sqlx::Error> {
        let query = format!("SELECT {SCREEN_COLUMNS} FROM plan_screens WHERE id = $1");
        sqlx::query_as::<_, PlanScreen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_days(
        pool: &PgPool,
        day_ids: &[DbId],
    ) -> Result<Vec<PlanScreen>, sqlx::Error> {
        if day_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SCREEN_COLUMNS} FROM plan_screens WHERE day_id = ANY($1) ORDER BY id"
        );
        sqlx::query_as::<_, PlanScreen>(&query)
            .bind(day_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        day_id: DbId,
        input: &CreatePlanScreen,
    ) -> Result<PlanScreen, sqlx::Error> {
        let query = format!(
            "INSERT INTO plan_screens (day_id, screen_name)
             VALUES ($1, $2)
             RETURNING {SCREEN_COLUMNS}"
        );
        sqlx::query_as::<_, PlanScreen>(&query)
            .bind(day_id)
            .bind(&input.screen_name)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        day_id: DbId,
        id: DbId,
        input: &UpdatePlanScreen,
    ) -> Result<Option<PlanScreen>, sqlx::Error> {
        let query = format!(
            "UPDATE plan_screens SET
                screen_name = COALESCE($3, screen_name),
                updated_at = NOW()
             WHERE id = $1 AND day_id = $2
             RETURNING {SCREEN_COLUMNS}"
        );
        sqlx::query_as::<_, PlanScreen>(&query)
            .bind(id)
            .bind(day_id)
            .bind(&input.screen_name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, day_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plan_screens WHERE id = $1 AND day_id = $2")
            .bind(id)
            .bind(day_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a single screen as a tree node, including its slots.
    pub async fn load_node(pool: &PgPool, screen: PlanScreen) -> Result<Screen, sqlx::Error> {
        let mut slots = PlanSlotRepo::list_by_screens(pool, &[screen.id]).await?;
        Ok(screen.into_node(&mut slots))
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// CRUD for `plan_slots`, scoped by screen.
pub struct PlanSlotRepo;

impl PlanSlotRepo {
    pub async fn list_by_screens(
        pool: &PgPool,
        screen_ids: &[DbId],
    ) -> Result<Vec<PlanSlot>, sqlx::Error> {
        if screen_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SLOT_COLUMNS} FROM plan_slots WHERE screen_id = ANY($1) ORDER BY {SLOT_ORDER}"
        );
        sqlx::query_as::<_, PlanSlot>(&query)
            .bind(screen_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        screen_id: DbId,
        input: &SlotInput,
    ) -> Result<Slot, sqlx::Error> {
        let query = format!(
            "INSERT INTO plan_slots
                (screen_id, title, start_time, end_time, director, moderator,
                 duration, category, description, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {SLOT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PlanSlot>(&query)
            .bind(screen_id)
            .bind(&input.title)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(&input.director)
            .bind(&input.moderator)
            .bind(&input.duration)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.order)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Replace every field of a slot.
    pub async fn update(
        pool: &PgPool,
        screen_id: DbId,
        id: DbId,
        input: &SlotInput,
    ) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!(
            "UPDATE plan_slots SET
                title = $3,
                start_time = $4,
                end_time = $5,
                director = $6,
                moderator = $7,
                duration = $8,
                category = $9,
                description = $10,
                sort_order = $11,
                updated_at = NOW()
             WHERE id = $1 AND screen_id = $2
             RETURNING {SLOT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PlanSlot>(&query)
            .bind(id)
            .bind(screen_id)
            .bind(&input.title)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(&input.director)
            .bind(&input.moderator)
            .bind(&input.duration)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.order)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Slot::from))
    }

    pub async fn delete(pool: &PgPool, screen_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plan_slots WHERE id = $1 AND screen_id = $2")
            .bind(id)
            .bind(screen_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
