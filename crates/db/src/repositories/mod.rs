//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod about_item_repo;
pub mod award_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod curated_image_repo;
pub mod event_repo;
pub mod registration_repo;
pub mod session_plan_repo;
pub mod submission_repo;
pub mod workshop_repo;

pub use about_item_repo::AboutItemRepo;
pub use award_repo::{AwardRepo, NominationRepo};
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use curated_image_repo::CuratedImageRepo;
pub use event_repo::EventRepo;
pub use registration_repo::RegistrationRepo;
pub use session_plan_repo::{PlanDayRepo, PlanScreenRepo, PlanSlotRepo, SessionPlanRepo};
pub use submission_repo::SubmissionRepo;
pub use workshop_repo::WorkshopRepo;

/// Bind arguments for an edit of a nullable column: whether the column is
/// written at all, and the value written (`None` clears it).
///
/// Pairs with `col = CASE WHEN $sent THEN $value ELSE col END`.
pub(crate) fn nullable_args<T>(change: &Option<Option<T>>) -> (bool, Option<&T>) {
    (change.is_some(), change.as_ref().and_then(Option::as_ref))
}
