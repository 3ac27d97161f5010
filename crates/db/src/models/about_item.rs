//! "About" page item model: a titled text block with up to ten images.

use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `about_items` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AboutItem {
    pub id: DbId,
    pub title: String,
    pub body: String,
    /// Stored upload paths, in display order.
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAboutItem {
    pub title: String,
    pub body: Option<String>,
    pub images: Vec<String>,
}

/// `images`, when present, is the complete new list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAboutItem {
    pub title: Option<String>,
    pub body: Option<String>,
    pub images: Option<Vec<String>>,
}
