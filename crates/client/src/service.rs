//! Service traits the admin controllers talk to.
//!
//! [`FestivalClient`](crate::http::FestivalClient) implements all of them
//! over HTTP; tests substitute in-memory fakes.

use async_trait::async_trait;

use festival_core::session_plan::{Day, Plan, Screen, Slot};
use festival_core::types::DbId;

use crate::error::ClientResult;
use crate::models::{Contact, DayInput, Resource, ScreenInput, SlotInput};

/// Remote operations on one session plan and its day / screen / slot
/// hierarchy. Each mutation returns the node as the server stored it.
#[async_trait]
pub trait SessionPlanService: Send + Sync {
    async fn get_plan(&self, plan_id: DbId) -> ClientResult<Plan>;

    async fn create_day(&self, plan_id: DbId, input: &DayInput) -> ClientResult<Day>;
    async fn update_day(&self, plan_id: DbId, day_id: DbId, input: &DayInput)
        -> ClientResult<Day>;
    async fn delete_day(&self, plan_id: DbId, day_id: DbId) -> ClientResult<()>;

    async fn create_screen(&self, day_id: DbId, input: &ScreenInput) -> ClientResult<Screen>;
    async fn update_screen(
        &self,
        day_id: DbId,
        screen_id: DbId,
        input: &ScreenInput,
    ) -> ClientResult<Screen>;
    async fn delete_screen(&self, day_id: DbId, screen_id: DbId) -> ClientResult<()>;

    async fn create_slot(&self, screen_id: DbId, input: &SlotInput) -> ClientResult<Slot>;
    async fn update_slot(
        &self,
        screen_id: DbId,
        slot_id: DbId,
        input: &SlotInput,
    ) -> ClientResult<Slot>;
    async fn delete_slot(&self, screen_id: DbId, slot_id: DbId) -> ClientResult<()>;
}

/// Fetch-all and delete for a flat collection.
#[async_trait]
pub trait CollectionService<T: Resource>: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<T>>;
    async fn delete(&self, id: DbId) -> ClientResult<()>;
}

/// Contacts additionally carry a follow-up flag.
#[async_trait]
pub trait ContactService: CollectionService<Contact> {
    async fn set_contacted(&self, id: DbId, contacted: bool) -> ClientResult<Contact>;
}

/// A file chosen in a form, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDraft {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One multipart create or update, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Collection path under `/api/v1`, e.g. `"about-items"`.
    pub resource: &'static str,
    /// `None` creates (`POST`); `Some(id)` updates (`PUT .../{id}`).
    pub target: Option<DbId>,
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileDraft)>,
}

/// Sends multipart forms. The response is the stored entity as JSON.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn submit(&self, request: UploadRequest) -> ClientResult<serde_json::Value>;
}
