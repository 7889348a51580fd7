// src/db/link_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::link::{Link, LinkPayload},
};

// Links não guardam organization_id: o escopo passa pela localidade dona
#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista do painel: sort_order crescente, empates pelo mais recente.
    pub async fn list_for_location(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
    ) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT l.*
            FROM links l
            JOIN locations loc ON loc.id = l.location_id
            WHERE l.location_id = $1 AND loc.organization_id = $2
            ORDER BY l.sort_order ASC, l.created_at DESC
            "#,
        )
        .bind(location_id)
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Retorna `None` quando a localidade não pertence à organização.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        location_id: Uuid,
        input: &LinkPayload,
        url: &str,
    ) -> Result<Option<Link>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links
                (location_id, title, url, description, icon_url, category, method, featured_type, sort_order, is_active)
            SELECT $1, $3, $4, $5, $6, $7, $8, $9, $10, TRUE
            WHERE EXISTS (SELECT 1 FROM locations WHERE id = $1 AND organization_id = $2)
            RETURNING *
            "#,
        )
        .bind(location_id)
        .bind(organization_id)
        .bind(&input.title)
        .bind(url)
        .bind(&input.description)
        .bind(&input.icon_url)
        .bind(input.category)
        .bind(input.effective_method())
        .bind(input.featured_type)
        .bind(input.sort_order)
        .fetch_optional(executor)
        .await?;

        Ok(link)
    }

    // location_id é fixo após a criação
    pub async fn update<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        input: &LinkPayload,
        url: &str,
    ) -> Result<Option<Link>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links SET
                title = $3,
                url = $4,
                description = $5,
                icon_url = $6,
                category = $7,
                method = $8,
                featured_type = $9,
                sort_order = $10,
                updated_at = NOW()
            WHERE id = $1
              AND location_id IN (SELECT id FROM locations WHERE organization_id = $2)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(&input.title)
        .bind(url)
        .bind(&input.description)
        .bind(&input.icon_url)
        .bind(input.category)
        .bind(input.effective_method())
        .bind(input.featured_type)
        .bind(input.sort_order)
        .fetch_optional(executor)
        .await?;

        Ok(link)
    }

    pub async fn toggle_active<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Link>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
              AND location_id IN (SELECT id FROM locations WHERE organization_id = $2)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(executor)
        .await?;

        Ok(link)
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
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE id = $1
              AND location_id IN (SELECT id FROM locations WHERE organization_id = $2)
            "#,
        )
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

    fn payload(title: &str) -> LinkPayload {
        serde_json::from_value(serde_json::json!({ "title": title, "url": "graca.org" })).unwrap()
    }

    #[sqlx::test]
    async fn links_are_scoped_through_their_location(pool: PgPool) {
        let orgs = OrganizationRepository::new(pool.clone());
        let graca = orgs.create(&pool, "Igreja da Graça", "graca", "starter").await.unwrap();
        let siao = orgs.create(&pool, "Igreja Sião", "siao", "starter").await.unwrap();
        let sede = LocationRepository::new(pool.clone())
            .create(&pool, graca.id, "Sede", "sede", None)
            .await
            .unwrap();

        let repo = LinkRepository::new(pool.clone());

        // Localidade de outra igreja: nada é inserido
        assert!(repo
            .create(&pool, siao.id, sede.id, &payload("Oferta"), "https://graca.org")
            .await
            .unwrap()
            .is_none());

        let link = repo
            .create(&pool, graca.id, sede.id, &payload("Oferta"), "https://graca.org")
            .await
            .unwrap()
            .unwrap();
        assert!(link.is_active);

        assert!(repo.toggle_active(&pool, siao.id, link.id).await.unwrap().is_none());
        assert!(repo
            .update(&pool, siao.id, link.id, &payload("Golpe"), "https://golpe.example")
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.delete(&pool, siao.id, link.id).await.unwrap(), 0);
        assert!(repo.list_for_location(siao.id, sede.id).await.unwrap().is_empty());

        let toggled = repo.toggle_active(&pool, graca.id, link.id).await.unwrap().unwrap();
        assert!(!toggled.is_active);
        assert_eq!(repo.list_for_location(graca.id, sede.id).await.unwrap()[0].title, "Oferta");
        assert_eq!(repo.delete(&pool, graca.id, link.id).await.unwrap(), 1);
    }
}
