//! Repository for the `curated_images` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::curated_image::{CreateCuratedImage, CuratedImage, UpdateCuratedImage};

const COLUMNS: &str = "id, category_id, title, photographer, image, created_at, updated_at";

/// Provides CRUD operations for curated gallery images.
pub struct CuratedImageRepo;

impl CuratedImageRepo {
    /// List images, newest first, optionally restricted to one category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<CuratedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM curated_images
             WHERE ($1::BIGINT IS NULL OR category_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CuratedImage>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CuratedImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM curated_images WHERE id = $1");
        sqlx::query_as::<_, CuratedImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateCuratedImage,
    ) -> Result<CuratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO curated_images (category_id, title, photographer, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CuratedImage>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.photographer)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCuratedImage,
    ) -> Result<Option<CuratedImage>, sqlx::Error> {
        let query = format!(
            "UPDATE curated_images SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                photographer = CASE WHEN $6 THEN $4 ELSE photographer END,
                image = COALESCE($5, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (photographer_sent, photographer) = nullable_args(&input.photographer);
        sqlx::query_as::<_, CuratedImage>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(photographer)
            .bind(&input.image)
            .bind(photographer_sent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM curated_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
