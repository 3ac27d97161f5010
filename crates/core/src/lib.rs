//! Festival CMS domain logic.
//!
//! Pure, I/O-free building blocks shared by the API server and the client
//! service layer: the session-plan tree and its scoped updater, list
//! filtering and pagination, upload/form validation, role permissions and
//! user-facing notices.

pub mod error;
pub mod listing;
pub mod notice;
pub mod roles;
pub mod session_plan;
pub mod status;
pub mod types;
pub mod upload;
