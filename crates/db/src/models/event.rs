//! Festival event model.

use chrono::NaiveDate;
use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub venue: Option<Option<String>>,
    pub event_date: Option<NaiveDate>,
    pub image: Option<String>,
}
