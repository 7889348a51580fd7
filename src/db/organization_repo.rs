// src/db/organization_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::organization::{Organization, OrganizationSummary, UpdateBrandingPayload},
};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let org = sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(org)
    }

    /// Cria a organização. Aceita um executor (pool ou transação).
    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
        plan_name: &str,
    ) -> Result<Organization, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, slug, plan_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(plan_name)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Já existe uma igreja com esse slug."))
    }

    pub async fn update_branding<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateBrandingPayload,
    ) -> Result<Option<Organization>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations SET
                logo_url = $2,
                primary_color = $3,
                accent_color = $4,
                contact_email = $5,
                contact_phone = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.logo_url)
        .bind(&input.primary_color)
        .bind(&input.accent_color)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .fetch_optional(executor)
        .await?;

        Ok(org)
    }

    pub async fn update_payment_account<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payment_account_id: &str,
    ) -> Result<Option<Organization>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations
            SET payment_account_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_account_id)
        .fetch_optional(executor)
        .await?;

        Ok(org)
    }

    /// Remove a organização (cascata para localidades, links, tags e equipe).
    /// Retorna quantas linhas foram de fato removidas.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<OrganizationSummary>, AppError> {
        let orgs = sqlx::query_as::<_, OrganizationSummary>(
            "SELECT id, name, slug, created_at FROM organizations ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orgs)
    }
}
