//! Repositories for the `awards` and `nominations` tables.

use festival_core::types::DbId;
use sqlx::PgPool;

use super::nullable_args;
use crate::models::award::{
    Award, CreateAward, CreateNomination, Nomination, UpdateAward, UpdateNomination,
};

const AWARD_COLUMNS: &str = "id, title, year, description, image, created_at, updated_at";
const NOMINATION_COLUMNS: &str =
    "id, award_id, nominee, film_title, category, is_winner, created_at, updated_at";

/// Provides CRUD operations for awards.
pub struct AwardRepo;

impl AwardRepo {
    /// List awards, most recent year first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Award>, sqlx::Error> {
        let query = format!("SELECT {AWARD_COLUMNS} FROM awards ORDER BY year DESC, title ASC");
        sqlx::query_as::<_, Award>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Award>, sqlx::Error> {
        let query = format!("SELECT {AWARD_COLUMNS} FROM awards WHERE id = $1");
        sqlx::query_as::<_, Award>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateAward) -> Result<Award, sqlx::Error> {
        let query = format!(
            "INSERT INTO awards (title, year, description, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {AWARD_COLUMNS}"
        );
        sqlx::query_as::<_, Award>(&query)
            .bind(&input.title)
            .bind(input.year)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAward,
    ) -> Result<Option<Award>, sqlx::Error> {
        let query = format!(
            "UPDATE awards SET
                title = COALESCE($2, title),
                year = COALESCE($3, year),
                description = CASE WHEN $6 THEN $4 ELSE description END,
                image = COALESCE($5, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {AWARD_COLUMNS}"
        );
        let (description_sent, description) = nullable_args(&input.description);
        sqlx::query_as::<_, Award>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.year)
            .bind(description)
            .bind(&input.image)
            .bind(description_sent)
            .fetch_optional(pool)
            .await
    }

    /// Delete an award and, by cascade, its nominations.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM awards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides CRUD operations for nominations.
pub struct NominationRepo;

impl NominationRepo {
    /// List an award's nominations, winners first.
    pub async fn list_by_award(
        pool: &PgPool,
        award_id: DbId,
    ) -> Result<Vec<Nomination>, sqlx::Error> {
        let query = format!(
            "SELECT {NOMINATION_COLUMNS} FROM nominations
             WHERE award_id = $1
             ORDER BY is_winner DESC, id ASC"
        );
        sqlx::query_as::<_, Nomination>(&query)
            .bind(award_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateNomination) -> Result<Nomination, sqlx::Error> {
        let query = format!(
            "INSERT INTO nominations (award_id, nominee, film_title, category, is_winner)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE))
             RETURNING {NOMINATION_COLUMNS}"
        );
        sqlx::query_as::<_, Nomination>(&query)
            .bind(input.award_id)
            .bind(&input.nominee)
            .bind(&input.film_title)
            .bind(&input.category)
            .bind(input.is_winner)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNomination,
    ) -> Result<Option<Nomination>, sqlx::Error> {
        let query = format!(
            "UPDATE nominations SET
                nominee = COALESCE($2, nominee),
                film_title = COALESCE($3, film_title),
                category = CASE WHEN $6 THEN $4 ELSE category END,
                is_winner = COALESCE($5, is_winner),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {NOMINATION_COLUMNS}"
        );
        let (category_sent, category) = nullable_args(&input.category);
        sqlx::query_as::<_, Nomination>(&query)
            .bind(id)
            .bind(&input.nominee)
            .bind(&input.film_title)
            .bind(category)
            .bind(input.is_winner)
            .bind(category_sent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM nominations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
