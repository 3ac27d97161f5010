//! Wire types as the dashboard receives them.
//!
//! Flat resources arrive in snake_case; identifiers are accepted as either
//! `id` or `_id` and collapsed into one `id` field here, so everything past
//! deserialization matches on a single key. The session plan tree reuses
//! the `festival_core::session_plan` nodes directly.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use festival_core::listing::Searchable;
use festival_core::types::{DbId, Identified, Timestamp};

/// A flat resource served from its own collection endpoint.
pub trait Resource: Identified + Searchable + DeserializeOwned + Send + Sync + 'static {
    /// Path segment under `/api/v1`, e.g. `"contacts"`.
    const PATH: &'static str;
    /// Human-readable name used in notices.
    const LABEL: &'static str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> DbId {
                self.id
            }
        })*
    };
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Session plans
// ---------------------------------------------------------------------------

/// A plan as listed on the plan picker (no days).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub festival: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayInput {
    pub day_number: i32,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInput {
    pub screen_name: String,
}

/// Every field of the slot form; an update replaces the whole slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInput {
    pub title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub director: Option<String>,
    pub moderator: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Inbound messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub contacted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), opt(&self.phone), self.message.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "contacted" => Some(self.contacted.to_string()),
            _ => None,
        }
    }
}

impl Resource for Contact {
    const PATH: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    #[serde(alias = "_id")]
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

impl Searchable for Submission {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.film_title.as_str(),
            self.director.as_str(),
            self.email.as_str(),
            opt(&self.country),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            "category" => self.category.clone(),
            _ => None,
        }
    }
}

impl Resource for Submission {
    const PATH: &'static str = "submissions";
    const LABEL: &'static str = "Submission";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Registration {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub workshop_id: Option<DbId>,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Registration {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.email.as_str(), opt(&self.phone)]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "workshop" => self.workshop_id.map(|id| id.to_string()),
            _ => None,
        }
    }
}

impl Resource for Registration {
    const PATH: &'static str = "registrations";
    const LABEL: &'static str = "Registration";
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), opt(&self.description)]
    }
}

impl Resource for Category {
    const PATH: &'static str = "categories";
    const LABEL: &'static str = "Category";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CuratedImage {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub photographer: Option<String>,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for CuratedImage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), opt(&self.photographer)]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category_id.to_string()),
            _ => None,
        }
    }
}

impl Resource for CuratedImage {
    const PATH: &'static str = "curated-images";
    const LABEL: &'static str = "Image";
}

// ---------------------------------------------------------------------------
// Programme content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), opt(&self.venue), opt(&self.description)]
    }
}

impl Resource for Event {
    const PATH: &'static str = "events";
    const LABEL: &'static str = "Event";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workshop {
    #[serde(alias = "_id")]
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

impl Searchable for Workshop {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), opt(&self.instructor)]
    }
}

impl Resource for Workshop {
    const PATH: &'static str = "workshops";
    const LABEL: &'static str = "Workshop";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AboutItem {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for AboutItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.body.as_str()]
    }
}

impl Resource for AboutItem {
    const PATH: &'static str = "about-items";
    const LABEL: &'static str = "About item";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Award {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Award {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), opt(&self.description)]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "year" => Some(self.year.to_string()),
            _ => None,
        }
    }
}

impl Resource for Award {
    const PATH: &'static str = "awards";
    const LABEL: &'static str = "Award";
}

/// Nominations are listed per award, so they are not a [`Resource`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nomination {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub award_id: DbId,
    pub nominee: String,
    pub film_title: String,
    pub category: Option<String>,
    pub is_winner: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Nomination {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.nominee.as_str(), self.film_title.as_str(), opt(&self.category)]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "winner" => Some(self.is_winner.to_string()),
            _ => None,
        }
    }
}

identified!(
    PlanSummary,
    Contact,
    Submission,
    Registration,
    Category,
    CuratedImage,
    Event,
    Workshop,
    AboutItem,
    Award,
    Nomination,
);
