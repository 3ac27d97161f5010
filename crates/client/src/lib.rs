//! Client side of the festival CMS.
//!
//! [`FestivalClient`] talks to the API over HTTP and implements the
//! service traits in [`service`]. The admin controllers are written
//! against those traits:
//!
//! - [`PlanEditor`] keeps a local session plan tree in step with the
//!   server, patching only the branch a confirmed change touched.
//! - [`ListPage`] fetches a collection once and searches, filters and
//!   pages it locally.
//! - [`UploadForm`] validates multipart forms before sending them and
//!   guards against double submission.

pub mod config;
pub mod error;
pub mod http;
pub mod list_page;
pub mod models;
pub mod notifier;
pub mod plan_editor;
pub mod service;
pub mod upload_form;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::FestivalClient;
pub use list_page::ListPage;
pub use notifier::{Notifier, TracingNotifier};
pub use plan_editor::PlanEditor;
pub use upload_form::UploadForm;
