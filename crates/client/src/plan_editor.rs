//! Session plan editor: a local copy of one plan tree kept in step with the
//! server.
//!
//! Every mutation follows the same sequence: check the session's
//! permissions, call the service, and only once the server has confirmed
//! patch the cached tree with the node it returned. A failed call leaves
//! the tree untouched. Each action ends in exactly one notice.

use festival_core::error::CoreError;
use festival_core::notice::Notice;
use festival_core::roles::Permissions;
use festival_core::session_plan::{
    add_child, clamp_active_index, remove_child, update_child, Day, DayPath, ParentPath, Plan,
    PlanRoot, ScreenPath,
};
use festival_core::types::DbId;

use crate::error::{ClientError, ClientResult};
use crate::models::{DayInput, ScreenInput, SlotInput};
use crate::notifier::Notifier;
use crate::service::SessionPlanService;

pub struct PlanEditor<S, N> {
    service: S,
    notifier: N,
    permissions: Permissions,
    plan: Plan,
    active_day: usize,
}

impl<S: SessionPlanService, N: Notifier> PlanEditor<S, N> {
    pub fn new(service: S, notifier: N, permissions: Permissions, plan: Plan) -> Self {
        Self {
            service,
            notifier,
            permissions,
            plan,
            active_day: 0,
        }
    }

    /// Fetch a plan and open it. A failed fetch is reported as a notice.
    pub async fn load(
        service: S,
        notifier: N,
        permissions: Permissions,
        plan_id: DbId,
    ) -> ClientResult<Self> {
        match service.get_plan(plan_id).await {
            Ok(plan) => Ok(Self::new(service, notifier, permissions, plan)),
            Err(err) => {
                tracing::warn!(plan_id, error = %err, "Failed to load session plan");
                notifier.notify(err.to_notice("Failed to load session plan"));
                Err(err)
            }
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn active_day_index(&self) -> usize {
        self.active_day
    }

    pub fn active_day(&self) -> Option<&Day> {
        self.plan.days.get(self.active_day).map(|day| day.as_ref())
    }

    pub fn set_active_day(&mut self, index: usize) {
        self.active_day = clamp_active_index(index, self.plan.days.len());
    }

    // ---- days ----

    pub async fn add_day(&mut self, input: &DayInput) -> ClientResult<()> {
        self.authorize(self.permissions.require_create())?;
        let result = self.service.create_day(self.plan.id, input).await;
        let day = self.report(result, "Day added", "Failed to add day")?;

        tracing::info!(plan_id = self.plan.id, day_id = day.id, "Day added");
        self.plan = add_child(&self.plan, &PlanRoot, day);
        Ok(())
    }

    pub async fn update_day(&mut self, day_id: DbId, input: &DayInput) -> ClientResult<()> {
        self.authorize(self.permissions.require_edit())?;
        let result = self.service.update_day(self.plan.id, day_id, input).await;
        let day = self.report(result, "Day updated", "Failed to update day")?;

        tracing::info!(plan_id = self.plan.id, day_id, "Day updated");
        self.plan = update_child(&self.plan, &PlanRoot, day_id, day);
        Ok(())
    }

    /// Delete a day with all its screens and slots. The active day index is
    /// clamped to the remaining days.
    pub async fn delete_day(&mut self, day_id: DbId) -> ClientResult<()> {
        self.authorize(self.permissions.require_delete())?;
        let result = self.service.delete_day(self.plan.id, day_id).await;
        self.report(result, "Day deleted", "Failed to delete day")?;

        tracing::info!(plan_id = self.plan.id, day_id, "Day deleted");
        self.plan = remove_child(&self.plan, &PlanRoot, day_id);
        self.active_day = clamp_active_index(self.active_day, self.plan.days.len());
        Ok(())
    }

    // ---- screens ----

    pub async fn add_screen(&mut self, day_id: DbId, input: &ScreenInput) -> ClientResult<()> {
        self.authorize(self.permissions.require_create())?;
        let result = self.service.create_screen(day_id, input).await;
        let screen = self.report(result, "Screen added", "Failed to add screen")?;

        let path = DayPath { day_id };
        self.warn_if_detached(&path, "screen");
        tracing::info!(day_id, screen_id = screen.id, "Screen added");
        self.plan = add_child(&self.plan, &path, screen);
        Ok(())
    }

    pub async fn update_screen(
        &mut self,
        day_id: DbId,
        screen_id: DbId,
        input: &ScreenInput,
    ) -> ClientResult<()> {
        self.authorize(self.permissions.require_edit())?;
        let result = self.service.update_screen(day_id, screen_id, input).await;
        let screen = self.report(result, "Screen updated", "Failed to update screen")?;

        let path = DayPath { day_id };
        self.warn_if_detached(&path, "screen");
        tracing::info!(day_id, screen_id, "Screen updated");
        self.plan = update_child(&self.plan, &path, screen_id, screen);
        Ok(())
    }

    pub async fn delete_screen(&mut self, day_id: DbId, screen_id: DbId) -> ClientResult<()> {
        self.authorize(self.permissions.require_delete())?;
        let result = self.service.delete_screen(day_id, screen_id).await;
        self.report(result, "Screen deleted", "Failed to delete screen")?;

        let path = DayPath { day_id };
        self.warn_if_detached(&path, "screen");
        tracing::info!(day_id, screen_id, "Screen deleted");
        self.plan = remove_child(&self.plan, &path, screen_id);
        Ok(())
    }

    // ---- slots ----

    pub async fn add_slot(
        &mut self,
        day_id: DbId,
        screen_id: DbId,
        input: &SlotInput,
    ) -> ClientResult<()> {
        self.authorize(self.permissions.require_create())?;
        let result = self.service.create_slot(screen_id, input).await;
        let slot = self.report(result, "Slot added", "Failed to add slot")?;

        let path = ScreenPath { day_id, screen_id };
        self.warn_if_detached(&path, "slot");
        tracing::info!(day_id, screen_id, slot_id = slot.id, "Slot added");
        self.plan = add_child(&self.plan, &path, slot);
        Ok(())
    }

    pub async fn update_slot(
        &mut self,
        day_id: DbId,
        screen_id: DbId,
        slot_id: DbId,
        input: &SlotInput,
    ) -> ClientResult<()> {
        self.authorize(self.permissions.require_edit())?;
        let result = self.service.update_slot(screen_id, slot_id, input).await;
        let slot = self.report(result, "Slot updated", "Failed to update slot")?;

        let path = ScreenPath { day_id, screen_id };
        self.warn_if_detached(&path, "slot");
        tracing::info!(day_id, screen_id, slot_id, "Slot updated");
        self.plan = update_child(&self.plan, &path, slot_id, slot);
        Ok(())
    }

    pub async fn delete_slot(
        &mut self,
        day_id: DbId,
        screen_id: DbId,
        slot_id: DbId,
    ) -> ClientResult<()> {
        self.authorize(self.permissions.require_delete())?;
        let result = self.service.delete_slot(screen_id, slot_id).await;
        self.report(result, "Slot deleted", "Failed to delete slot")?;

        let path = ScreenPath { day_id, screen_id };
        self.warn_if_detached(&path, "slot");
        tracing::info!(day_id, screen_id, slot_id, "Slot deleted");
        self.plan = remove_child(&self.plan, &path, slot_id);
        Ok(())
    }

    // ---- private helpers ----

    fn authorize(&self, check: Result<(), CoreError>) -> ClientResult<()> {
        check.map_err(|err| {
            let err = ClientError::from(err);
            self.notifier.notify(err.to_notice("Not allowed"));
            err
        })
    }

    fn report<T>(&self, result: ClientResult<T>, success: &str, failure: &str) -> ClientResult<T> {
        match result {
            Ok(value) => {
                self.notifier.notify(Notice::success(success));
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(plan_id = self.plan.id, error = %err, "{failure}");
                self.notifier.notify(err.to_notice(failure));
                Err(err)
            }
        }
    }

    /// The server accepted a change under a parent this cache does not
    /// hold; the local patch will be a no-op.
    fn warn_if_detached<P: ParentPath>(&self, path: &P, kind: &str) {
        if !path.resolves(&self.plan) {
            tracing::warn!(
                plan_id = self.plan.id,
                kind,
                "Parent not found in cached plan; change not applied locally"
            );
        }
    }
}
