//! Repository for the `categories` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, cover_image, created_at, updated_at";

/// Provides CRUD operations for gallery categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, cover_image)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.cover_image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                description = CASE WHEN $5 THEN $3 ELSE description END,
                cover_image = COALESCE($4, cover_image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (description_sent, description) = nullable_args(&input.description);
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description)
            .bind(&input.cover_image)
            .bind(description_sent)
            .fetch_optional(pool)
            .await
    }

    /// Number of curated images filed under a category.
    pub async fn count_images(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM curated_images WHERE category_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a category. Fails with a foreign-key violation while images
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
