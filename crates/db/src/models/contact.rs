//! Contact form message model.

use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contacts` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Whether someone on the team has followed up.
    pub contacted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContact {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Body of `PATCH /contacts/{id}/contacted`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetContacted {
    pub contacted: bool,
}
