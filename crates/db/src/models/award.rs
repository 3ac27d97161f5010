//! Award and nomination models.

use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable_change;

/// A row from the `awards` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Award {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAward {
    pub title: String,
    pub year: i32,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAward {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub image: Option<String>,
}

/// A row from the `nominations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Nomination {
    pub id: DbId,
    pub award_id: DbId,
    pub nominee: String,
    pub film_title: String,
    pub category: Option<String>,
    pub is_winner: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a nomination. `award_id` is taken from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNomination {
    #[serde(default)]
    pub award_id: DbId,
    pub nominee: String,
    pub film_title: String,
    pub category: Option<String>,
    pub is_winner: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNomination {
    pub nominee: Option<String>,
    pub film_title: Option<String>,
    #[serde(default, deserialize_with = "nullable_change")]
    pub category: Option<Option<String>>,
    pub is_winner: Option<bool>,
}
