//! Repository for the `contacts` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact};

const COLUMNS: &str = "id, name, email, phone, message, contacted, created_at, updated_at";

/// Provides create/list/delete and follow-up tracking for contact messages.
pub struct ContactRepo;

impl ContactRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (name, email, phone, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Set the `contacted` flag. Setting the current value again is a no-op
    /// that still returns the row.
    pub async fn set_contacted(
        pool: &PgPool,
        id: DbId,
        contacted: bool,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                contacted = $2,
                updated_at = CASE WHEN contacted = $2 THEN updated_at ELSE NOW() END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(contacted)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
