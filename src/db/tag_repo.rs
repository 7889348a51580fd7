// src/db/tag_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tag::Tag,
};

const DUPLICATE_CODE: &str = "Já existe uma tag com esse código.";

#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT * FROM tags WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// `None` quando a localidade informada não pertence à organização.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        code: &str,
        label: Option<&str>,
        location_id: Option<Uuid>,
    ) -> Result<Option<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (organization_id, code, label, location_id)
            SELECT $1, $2, $3, $4
            WHERE $4::uuid IS NULL
               OR EXISTS (SELECT 1 FROM locations WHERE id = $4 AND organization_id = $1)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(code)
        .bind(label)
        .bind(location_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_CODE))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        code: &str,
        label: Option<&str>,
        location_id: Option<Uuid>,
    ) -> Result<Option<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags
            SET code = $3, label = $4, location_id = $5, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
              AND ($5::uuid IS NULL
                   OR EXISTS (SELECT 1 FROM locations WHERE id = $5 AND organization_id = $2))
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(code)
        .bind(label)
        .bind(location_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_CODE))
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
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LocationRepository, OrganizationRepository};

    #[sqlx::test]
    async fn tags_only_point_to_locations_of_the_same_organization(pool: PgPool) {
        let orgs = OrganizationRepository::new(pool.clone());
        let graca = orgs.create(&pool, "Igreja da Graça", "graca", "starter").await.unwrap();
        let siao = orgs.create(&pool, "Igreja Sião", "siao", "starter").await.unwrap();
        let sede_siao = LocationRepository::new(pool.clone())
            .create(&pool, siao.id, "Sede", "sede", None)
            .await
            .unwrap();

        let repo = TagRepository::new(pool.clone());
        assert!(repo
            .create(&pool, graca.id, "TAG-001", None, Some(sede_siao.id))
            .await
            .unwrap()
            .is_none());

        let tag = repo
            .create(&pool, graca.id, "TAG-001", Some("Porta"), None)
            .await
            .unwrap()
            .unwrap();
        assert!(repo
            .update(&pool, siao.id, tag.id, "TAG-001", None, None)
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.delete(&pool, siao.id, tag.id).await.unwrap(), 0);
        assert_eq!(repo.list(graca.id).await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn tag_codes_are_globally_unique(pool: PgPool) {
        let orgs = OrganizationRepository::new(pool.clone());
        let graca = orgs.create(&pool, "Igreja da Graça", "graca", "starter").await.unwrap();
        let siao = orgs.create(&pool, "Igreja Sião", "siao", "starter").await.unwrap();

        let repo = TagRepository::new(pool.clone());
        repo.create(&pool, graca.id, "TAG-001", None, None).await.unwrap();

        let err = repo.create(&pool, siao.id, "TAG-001", None, None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
