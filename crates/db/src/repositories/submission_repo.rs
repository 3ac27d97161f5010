//! Repository for the `submissions` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::submission::{CreateSubmission, Submission, UpdateSubmission};

const COLUMNS: &str = "id, film_title, director, email, phone, country, category, \
                       duration_minutes, synopsis, status, created_at, updated_at";

/// Provides CRUD operations for film submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// List every submission, newest first. The dashboard filters and
    /// paginates client-side.
    pub async fn list(pool: &PgPool) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Submission>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a submission in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateSubmission) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions
                (film_title, director, email, phone, country, category,
                 duration_minutes, synopsis)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.film_title)
            .bind(&input.director)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(&input.category)
            .bind(input.duration_minutes)
            .bind(&input.synopsis)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubmission,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET
                film_title = COALESCE($2, film_title),
                director = COALESCE($3, director),
                email = COALESCE($4, email),
                phone = CASE WHEN $11 THEN $5 ELSE phone END,
                country = CASE WHEN $12 THEN $6 ELSE country END,
                category = CASE WHEN $13 THEN $7 ELSE category END,
                duration_minutes = COALESCE($8, duration_minutes),
                synopsis = CASE WHEN $14 THEN $9 ELSE synopsis END,
                status = COALESCE($10, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (phone_sent, phone) = nullable_args(&input.phone);
        let (country_sent, country) = nullable_args(&input.country);
        let (category_sent, category) = nullable_args(&input.category);
        let (synopsis_sent, synopsis) = nullable_args(&input.synopsis);
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(&input.film_title)
            .bind(&input.director)
            .bind(&input.email)
            .bind(phone)
            .bind(country)
            .bind(category)
            .bind(input.duration_minutes)
            .bind(synopsis)
            .bind(&input.status)
            .bind(phone_sent)
            .bind(country_sent)
            .bind(category_sent)
            .bind(synopsis_sent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
