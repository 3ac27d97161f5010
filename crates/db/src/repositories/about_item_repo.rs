//! Repository for the `about_items` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use crate::models::about_item::{AboutItem, CreateAboutItem, UpdateAboutItem};

const COLUMNS: &str = "id, title, body, images, created_at, updated_at";

/// Provides CRUD operations for about-page items.
pub struct AboutItemRepo;

impl AboutItemRepo {
    /// List items in creation order (the order they appear on the page).
    pub async fn list(pool: &PgPool) -> Result<Vec<AboutItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM about_items ORDER BY id ASC");
        sqlx::query_as::<_, AboutItem>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AboutItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM about_items WHERE id = $1");
        sqlx::query_as::<_, AboutItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateAboutItem) -> Result<AboutItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO about_items (title, body, images)
             VALUES ($1, COALESCE($2, ''), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutItem>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.images)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAboutItem,
    ) -> Result<Option<AboutItem>, sqlx::Error> {
        let query = format!(
            "UPDATE about_items SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                images = COALESCE($4, images),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.images)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM about_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
