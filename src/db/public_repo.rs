// src/db/public_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::public::{CheckoutOrganization, LinkTarget, PublicLink, PublicLocation, PublicOrganization},
};

/// Leituras (e o registro de cliques) das superfícies públicas: micro-site, redirecionamento e
/// checkout. Nenhuma delas exige usuário autenticado.
#[async_trait]
pub trait PublicStore: Send + Sync {
    async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<PublicOrganization>, AppError>;

    async fn find_location_by_slug(
        &self,
        organization_id: Uuid,
        slug: &str,
    ) -> Result<Option<PublicLocation>, AppError>;

    /// Links ativos, ordenados apenas por `sort_order` crescente.
    async fn list_active_links(&self, location_id: Uuid) -> Result<Vec<PublicLink>, AppError>;

    async fn find_link_target(&self, id: Uuid) -> Result<Option<LinkTarget>, AppError>;

    async fn record_click(&self, link_id: Uuid, location_id: Uuid) -> Result<(), AppError>;

    async fn find_checkout_organization(&self, slug: &str) -> Result<Option<CheckoutOrganization>, AppError>;
}

#[derive(Clone)]
pub struct PublicRepository {
    pool: PgPool,
}

impl PublicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublicStore for PublicRepository {
    async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<PublicOrganization>, AppError> {
        let org = sqlx::query_as::<_, PublicOrganization>(
            r#"
            SELECT id, name, slug, logo_url, primary_color, accent_color
            FROM organizations
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }

    async fn find_location_by_slug(
        &self,
        organization_id: Uuid,
        slug: &str,
    ) -> Result<Option<PublicLocation>, AppError> {
        let location = sqlx::query_as::<_, PublicLocation>(
            r#"
            SELECT id, name, slug, welcome_title, welcome_text
            FROM locations
            WHERE organization_id = $1 AND slug = $2
            "#,
        )
        .bind(organization_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn list_active_links(&self, location_id: Uuid) -> Result<Vec<PublicLink>, AppError> {
        let links = sqlx::query_as::<_, PublicLink>(
            r#"
            SELECT id, title, url, description, icon_url, category, method, featured_type
            FROM links
            WHERE location_id = $1 AND is_active = TRUE
            ORDER BY sort_order ASC
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn find_link_target(&self, id: Uuid) -> Result<Option<LinkTarget>, AppError> {
        let target = sqlx::query_as::<_, LinkTarget>(
            "SELECT id, url, is_active, location_id FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(target)
    }

    async fn record_click(&self, link_id: Uuid, location_id: Uuid) -> Result<(), AppError> {
        sqlx::query("INSERT INTO link_clicks (link_id, location_id) VALUES ($1, $2)")
            .bind(link_id)
            .bind(location_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_checkout_organization(&self, slug: &str) -> Result<Option<CheckoutOrganization>, AppError> {
        let org = sqlx::query_as::<_, CheckoutOrganization>(
            "SELECT name, slug, payment_account_id FROM organizations WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use super::*;
    use crate::models::link::{FeaturedType, LinkCategory};

    #[derive(Clone)]
    pub struct MemoryLink {
        pub link: PublicLink,
        pub location_id: Uuid,
        pub sort_order: i32,
        pub is_active: bool,
    }

    #[derive(Default)]
    struct Tables {
        organizations: Vec<(PublicOrganization, Option<String>)>,
        locations: Vec<(Uuid, PublicLocation)>,
        links: Vec<MemoryLink>,
        clicks: Vec<(Uuid, Uuid)>,
    }

    /// Implementação em memória para testes de serviço.
    #[derive(Default)]
    pub struct MemoryPublicStore {
        tables: Mutex<Tables>,
        pub fail_clicks: bool,
    }

    impl MemoryPublicStore {
        pub fn with_failing_clicks() -> Self {
            Self { fail_clicks: true, ..Self::default() }
        }

        pub fn add_organization(&self, slug: &str, payment_account_id: Option<&str>) -> Uuid {
            let id = Uuid::new_v4();
            self.tables.lock().unwrap().organizations.push((
                PublicOrganization {
                    id,
                    name: format!("Igreja {}", slug),
                    slug: slug.to_string(),
                    logo_url: None,
                    primary_color: None,
                    accent_color: None,
                },
                payment_account_id.map(str::to_string),
            ));
            id
        }

        pub fn add_location(&self, organization_id: Uuid, slug: &str) -> Uuid {
            let id = Uuid::new_v4();
            self.tables.lock().unwrap().locations.push((
                organization_id,
                PublicLocation {
                    id,
                    name: slug.to_uppercase(),
                    slug: slug.to_string(),
                    welcome_title: None,
                    welcome_text: None,
                },
            ));
            id
        }

        pub fn add_link(
            &self,
            location_id: Uuid,
            title: &str,
            url: &str,
            sort_order: i32,
            featured_type: Option<FeaturedType>,
        ) -> Uuid {
            let id = Uuid::new_v4();
            self.tables.lock().unwrap().links.push(MemoryLink {
                link: PublicLink {
                    id,
                    title: title.to_string(),
                    url: url.to_string(),
                    description: None,
                    icon_url: None,
                    category: LinkCategory::Generic,
                    method: None,
                    featured_type,
                },
                location_id,
                sort_order,
                is_active: true,
            });
            id
        }

        pub fn set_active(&self, link_id: Uuid, active: bool) {
            let mut tables = self.tables.lock().unwrap();
            if let Some(l) = tables.links.iter_mut().find(|l| l.link.id == link_id) {
                l.is_active = active;
            }
        }

        pub fn clicks(&self) -> Vec<(Uuid, Uuid)> {
            self.tables.lock().unwrap().clicks.clone()
        }
    }

    #[async_trait]
    impl PublicStore for MemoryPublicStore {
        async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<PublicOrganization>, AppError> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.organizations.iter().find(|(o, _)| o.slug == slug).map(|(o, _)| o.clone()))
        }

        async fn find_location_by_slug(
            &self,
            organization_id: Uuid,
            slug: &str,
        ) -> Result<Option<PublicLocation>, AppError> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .locations
                .iter()
                .find(|(org, l)| *org == organization_id && l.slug == slug)
                .map(|(_, l)| l.clone()))
        }

        async fn list_active_links(&self, location_id: Uuid) -> Result<Vec<PublicLink>, AppError> {
            let tables = self.tables.lock().unwrap();
            let mut links: Vec<&MemoryLink> = tables
                .links
                .iter()
                .filter(|l| l.location_id == location_id && l.is_active)
                .collect();
            // sort estável: empates ficam na ordem de inserção
            links.sort_by_key(|l| l.sort_order);
            Ok(links.into_iter().map(|l| l.link.clone()).collect())
        }

        async fn find_link_target(&self, id: Uuid) -> Result<Option<LinkTarget>, AppError> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.links.iter().find(|l| l.link.id == id).map(|l| LinkTarget {
                id,
                url: l.link.url.clone(),
                is_active: l.is_active,
                location_id: l.location_id,
            }))
        }

        async fn record_click(&self, link_id: Uuid, location_id: Uuid) -> Result<(), AppError> {
            if self.fail_clicks {
                return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            self.tables.lock().unwrap().clicks.push((link_id, location_id));
            Ok(())
        }

        async fn find_checkout_organization(&self, slug: &str) -> Result<Option<CheckoutOrganization>, AppError> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.organizations.iter().find(|(o, _)| o.slug == slug).map(|(o, acct)| {
                CheckoutOrganization {
                    name: o.name.clone(),
                    slug: o.slug.clone(),
                    payment_account_id: acct.clone(),
                }
            }))
        }
    }
}
