/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// An entity addressable by its canonical identifier.
///
/// Wire payloads may carry the identifier as either `id` or `_id`; models
/// collapse both into a single `id` field at deserialization time, so
/// matching never has to look at more than one field.
pub trait Identified {
    fn id(&self) -> DbId;
}
