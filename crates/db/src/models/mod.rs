//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches. Nullable
//!   columns use `Option<Option<T>>` so an edit can clear them.

use serde::{Deserialize, Deserializer};

pub mod about_item;
pub mod award;
pub mod category;
pub mod contact;
pub mod curated_image;
pub mod event;
pub mod registration;
pub mod session_plan;
pub mod submission;
pub mod workshop;

/// Deserialize a nullable field of an update DTO so that an explicit
/// `null` becomes `Some(None)` (clear the column) while a missing key stays
/// `None` (leave it alone). Use with `#[serde(default, deserialize_with = ...)]`.
pub fn nullable_change<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
