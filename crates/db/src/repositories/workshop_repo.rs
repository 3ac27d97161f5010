//! Repository for the `workshops` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::workshop::{CreateWorkshop, UpdateWorkshop, Workshop};

const COLUMNS: &str =
    "id, title, instructor, description, workshop_date, seats, image, created_at, updated_at";

/// Provides CRUD operations for workshops.
pub struct WorkshopRepo;

impl WorkshopRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshops ORDER BY workshop_date ASC, id ASC");
        sqlx::query_as::<_, Workshop>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshops WHERE id = $1");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateWorkshop) -> Result<Workshop, sqlx::Error> {
        let query = format!(
            "INSERT INTO workshops (title, instructor, description, workshop_date, seats, image)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(&input.title)
            .bind(&input.instructor)
            .bind(&input.description)
            .bind(input.workshop_date)
            .bind(input.seats)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkshop,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!(
            "UPDATE workshops SET
                title = COALESCE($2, title),
                instructor = CASE WHEN $8 THEN $3 ELSE instructor END,
                description = CASE WHEN $9 THEN $4 ELSE description END,
                workshop_date = COALESCE($5, workshop_date),
                seats = COALESCE($6, seats),
                image = COALESCE($7, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (instructor_sent, instructor) = nullable_args(&input.instructor);
        let (description_sent, description) = nullable_args(&input.description);
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(instructor)
            .bind(description)
            .bind(input.workshop_date)
            .bind(input.seats)
            .bind(&input.image)
            .bind(instructor_sent)
            .bind(description_sent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workshops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
