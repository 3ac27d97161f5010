//! Curated gallery image model.

use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `curated_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CuratedImage {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub photographer: Option<String>,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCuratedImage {
    pub category_id: DbId,
    pub title: String,
    pub photographer: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCuratedImage {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub photographer: Option<Option<String>>,
    pub image: Option<String>,
}
