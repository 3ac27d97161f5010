//! Repository for the `events` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::event::{CreateEvent, Event, UpdateEvent};

const COLUMNS: &str = "id, title, description, venue, event_date, image, created_at, updated_at";

/// Provides CRUD operations for festival events.
pub struct EventRepo;

impl EventRepo {
    /// List all events in calendar order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY event_date ASC, id ASC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, venue, event_date, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.venue)
            .bind(input.event_date)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = CASE WHEN $7 THEN $3 ELSE description END,
                venue = CASE WHEN $8 THEN $4 ELSE venue END,
                event_date = COALESCE($5, event_date),
                image = COALESCE($6, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (description_sent, description) = nullable_args(&input.description);
        let (venue_sent, venue) = nullable_args(&input.venue);
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description)
            .bind(venue)
            .bind(input.event_date)
            .bind(&input.image)
            .bind(description_sent)
            .bind(venue_sent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
