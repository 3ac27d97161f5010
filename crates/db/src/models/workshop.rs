//! Workshop model.

use chrono::NaiveDate;
use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workshops` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Workshop {
    pub id: DbId,
    pub title: String,
    pub instructor: Option<String>,
    pub description: Option<String>,
    pub workshop_date: NaiveDate,
    pub seats: i32,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkshop {
    pub title: String,
    pub instructor: Option<String>,
    pub description: Option<String>,
    pub workshop_date: NaiveDate,
    /// Defaults to 0 when omitted.
    pub seats: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkshop {
    pub title: Option<String>,
    pub instructor: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub workshop_date: Option<NaiveDate>,
    pub seats: Option<i32>,
    pub image: Option<String>,
}
