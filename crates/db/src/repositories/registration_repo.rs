//! Repository for the `registrations` table.

use festival_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{CreateRegistration, Registration};

const COLUMNS: &str = "id, full_name, email, phone, workshop_id, message, created_at, updated_at";

/// Provides create/list/delete for workshop registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Registration>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM registrations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Registration>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (full_name, email, phone, workshop_id, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.workshop_id)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
