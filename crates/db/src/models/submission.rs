//! Film submission model.

use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::nullable_change;

/// A row from the `submissions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Submission {
    pub id: DbId,
    pub film_title: String,
    pub director: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: i32,
    pub synopsis: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a submission sent from the public site.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubmission {
    #[validate(length(min = 1, max = 300))]
    pub film_title: String,
    #[validate(length(min = 1, max = 200))]
    pub director: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 5000))]
    pub synopsis: Option<String>,
}

/// DTO for a dashboard edit of a submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSubmission {
    #[validate(length(min = 1, max = 300))]
    pub film_title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub director: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    #[serde(default, deserialize_with = "nullable_change")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_change")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_change")]
    pub category: Option<Option<String>>,
    #[validate(range(min = 0, max = 1000))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 5000))]
    #[serde(default, deserialize_with = "nullable_change")]
    pub synopsis: Option<Option<String>>,
    pub status: Option<String>,
}
