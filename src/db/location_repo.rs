// src/db/location_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::location::Location};

const DUPLICATE_SLUG: &str = "Já existe uma localidade com esse slug.";

// Toda consulta é escopada pela organização do chamador
#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn find(&self, organization_id: Uuid, id: Uuid) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        slug: &str,
        address: Option<&str>,
    ) -> Result<Location, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (organization_id, name, slug, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(slug)
        .bind(address)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    // organization_id nunca é alterado
    pub async fn update<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        name: &str,
        slug: &str,
        address: Option<&str>,
    ) -> Result<Option<Location>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = $3, slug = $4, address = $5, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(name)
        .bind(slug)
        .bind(address)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    pub async fn update_welcome<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        welcome_title: Option<&str>,
        welcome_text: Option<&str>,
    ) -> Result<Option<Location>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET welcome_title = $3, welcome_text = $4, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(welcome_title)
        .bind(welcome_text)
        .fetch_optional(executor)
        .await?;

        Ok(location)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
