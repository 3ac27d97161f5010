//! In-memory collaborators for controller tests.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use festival_core::notice::Notice;
use festival_core::session_plan::{
    add_child, remove_child, update_child, Day, DayPath, Plan, PlanRoot, Screen, ScreenPath, Slot,
};
use festival_core::types::DbId;

use crate::error::{ClientError, ClientResult};
use crate::models::{Contact, DayInput, Resource, ScreenInput, SlotInput};
use crate::notifier::Notifier;
use crate::service::{
    CollectionService, ContactService, SessionPlanService, UploadRequest, UploadService,
};

/// Collects every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

fn api_failure(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: Some(message.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Session plans
// ---------------------------------------------------------------------------

/// Keeps its own copy of the plan tree and answers like the server does:
/// created nodes get fresh ids and updated nodes come back with their
/// current children. Clones share state.
#[derive(Debug, Clone)]
pub struct FakePlanService {
    next_id: Arc<AtomicI64>,
    calls: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    plan: Arc<Mutex<Plan>>,
}

impl FakePlanService {
    pub fn new(first_id: DbId) -> Self {
        Self::with_plan(
            first_id,
            Plan {
                id: 0,
                festival: "Shortfest".to_string(),
                year: 2025,
                days: Vec::new(),
            },
        )
    }

    /// Start from a stored plan, as if it had been loaded from the server.
    pub fn with_plan(first_id: DbId, plan: Plan) -> Self {
        Self {
            next_id: Arc::new(AtomicI64::new(first_id)),
            calls: Arc::new(AtomicUsize::new(0)),
            failure: Arc::new(Mutex::new(None)),
            plan: Arc::new(Mutex::new(plan)),
        }
    }

    /// Make every following call fail with this status and message.
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The tree as the fake server currently stores it.
    pub fn stored_plan(&self) -> Plan {
        self.plan.lock().unwrap().clone()
    }

    fn begin(&self) -> ClientResult<DbId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, message)) = self.failure.lock().unwrap().clone() {
            return Err(api_failure(status, &message));
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn apply(&self, change: impl FnOnce(&Plan) -> Plan) {
        let mut plan = self.plan.lock().unwrap();
        *plan = change(&plan);
    }

    fn screen_path(&self, screen_id: DbId) -> Option<ScreenPath> {
        let plan = self.plan.lock().unwrap();
        plan.days
            .iter()
            .find(|day| day.screen(screen_id).is_some())
            .map(|day| ScreenPath {
                day_id: day.id,
                screen_id,
            })
    }
}

fn slot_from(id: DbId, input: &SlotInput) -> Slot {
    Slot {
        id,
        title: input.title.clone(),
        start_time: input.start_time.clone(),
        end_time: input.end_time.clone(),
        director: input.director.clone(),
        moderator: input.moderator.clone(),
        duration: input.duration.clone(),
        category: input.category.clone(),
        description: input.description.clone(),
        order: input.order,
    }
}

#[async_trait]
impl SessionPlanService for FakePlanService {
    async fn get_plan(&self, plan_id: DbId) -> ClientResult<Plan> {
        self.begin()?;
        Ok(Plan {
            id: plan_id,
            ..self.stored_plan()
        })
    }

    async fn create_day(&self, _plan_id: DbId, input: &DayInput) -> ClientResult<Day> {
        let id = self.begin()?;
        let day = Day {
            id,
            day_number: input.day_number,
            date: input.date.clone(),
            screens: Vec::new(),
        };
        self.apply(|plan| add_child(plan, &PlanRoot, day.clone()));
        Ok(day)
    }

    async fn update_day(
        &self,
        _plan_id: DbId,
        day_id: DbId,
        input: &DayInput,
    ) -> ClientResult<Day> {
        self.begin()?;
        let screens = self
            .stored_plan()
            .day(day_id)
            .map(|day| day.screens.clone())
            .unwrap_or_default();
        let day = Day {
            id: day_id,
            day_number: input.day_number,
            date: input.date.clone(),
            screens,
        };
        self.apply(|plan| update_child(plan, &PlanRoot, day_id, day.clone()));
        Ok(day)
    }

    async fn delete_day(&self, _plan_id: DbId, day_id: DbId) -> ClientResult<()> {
        self.begin()?;
        self.apply(|plan| remove_child(plan, &PlanRoot, day_id));
        Ok(())
    }

    async fn create_screen(&self, day_id: DbId, input: &ScreenInput) -> ClientResult<Screen> {
        let id = self.begin()?;
        let screen = Screen {
            id,
            screen_name: input.screen_name.clone(),
            slots: Vec::new(),
        };
        self.apply(|plan| add_child(plan, &DayPath { day_id }, screen.clone()));
        Ok(screen)
    }

    async fn update_screen(
        &self,
        day_id: DbId,
        screen_id: DbId,
        input: &ScreenInput,
    ) -> ClientResult<Screen> {
        self.begin()?;
        let slots = self
            .stored_plan()
            .day(day_id)
            .and_then(|day| day.screen(screen_id))
            .map(|screen| screen.slots.clone())
            .unwrap_or_default();
        let screen = Screen {
            id: screen_id,
            screen_name: input.screen_name.clone(),
            slots,
        };
        self.apply(|plan| update_child(plan, &DayPath { day_id }, screen_id, screen.clone()));
        Ok(screen)
    }

    async fn delete_screen(&self, day_id: DbId, screen_id: DbId) -> ClientResult<()> {
        self.begin()?;
        self.apply(|plan| remove_child(plan, &DayPath { day_id }, screen_id));
        Ok(())
    }

    async fn create_slot(&self, screen_id: DbId, input: &SlotInput) -> ClientResult<Slot> {
        let id = self.begin()?;
        let slot = slot_from(id, input);
        if let Some(path) = self.screen_path(screen_id) {
            self.apply(|plan| add_child(plan, &path, slot.clone()));
        }
        Ok(slot)
    }

    async fn update_slot(
        &self,
        screen_id: DbId,
        slot_id: DbId,
        input: &SlotInput,
    ) -> ClientResult<Slot> {
        self.begin()?;
        let slot = slot_from(slot_id, input);
        if let Some(path) = self.screen_path(screen_id) {
            self.apply(|plan| update_child(plan, &path, slot_id, slot.clone()));
        }
        Ok(slot)
    }

    async fn delete_slot(&self, screen_id: DbId, slot_id: DbId) -> ClientResult<()> {
        self.begin()?;
        if let Some(path) = self.screen_path(screen_id) {
            self.apply(|plan| remove_child(plan, &path, slot_id));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Serves a fixed collection and records deletions. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeCollection<T> {
    items: Arc<Mutex<Vec<T>>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
}

impl<T: Clone> FakeCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn items(&self) -> Vec<T> {
        self.items.lock().unwrap().clone()
    }

    fn check(&self) -> ClientResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(api_failure(status, &message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: Resource + Clone> CollectionService<T> for FakeCollection<T> {
    async fn list(&self) -> ClientResult<Vec<T>> {
        self.check()?;
        Ok(self.items())
    }

    async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(api_failure(404, &format!("{} with id {id} not found", T::LABEL)));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactService for FakeCollection<Contact> {
    async fn set_contacted(&self, id: DbId, contacted: bool) -> ClientResult<Contact> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let contact = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| api_failure(404, &format!("Contact with id {id} not found")))?;
        if contact.contacted != contacted {
            contact.contacted = contacted;
            contact.updated_at = chrono::Utc::now();
        }
        Ok(contact.clone())
    }
}

pub fn contact(id: DbId, name: &str, contacted: bool) -> Contact {
    let now = chrono::Utc::now();
    Contact {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        message: "Hello".to_string(),
        contacted,
        created_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// Records submitted requests and answers with a preset body. Clones
/// share state. Built with [`FakeUploads::yielding`], each call yields once
/// before answering so a concurrent caller can observe it in flight.
#[derive(Debug, Clone, Default)]
pub struct FakeUploads {
    requests: Arc<Mutex<Vec<UploadRequest>>>,
    response: Arc<Mutex<serde_json::Value>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    yield_first: bool,
}

impl FakeUploads {
    pub fn yielding() -> Self {
        Self {
            yield_first: true,
            ..Self::default()
        }
    }

    pub fn respond_with(&self, body: serde_json::Value) {
        *self.response.lock().unwrap() = body;
    }

    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadService for FakeUploads {
    async fn submit(&self, request: UploadRequest) -> ClientResult<serde_json::Value> {
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        self.requests.lock().unwrap().push(request);
        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some((status, message)) => Err(api_failure(status, &message)),
            None => Ok(self.response.lock().unwrap().clone()),
        }
    }
}

/// Server JSON for an about item with `images` stored files.
pub fn about_item_json(id: DbId, images: usize) -> serde_json::Value {
    let images: Vec<String> = (0..images)
        .map(|i| format!("/uploads/about/{i}.png"))
        .collect();
    serde_json::json!({
        "id": id,
        "title": "Our history",
        "body": "",
        "images": images,
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-01T10:00:00Z"
    })
}
