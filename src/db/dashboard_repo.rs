// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardMetrics, GlobalCounts},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Contagens da organização. Cliques são contados pelas localidades dela.
    pub async fn organization_metrics(&self, organization_id: Uuid) -> Result<DashboardMetrics, AppError> {
        let metrics = sqlx::query_as::<_, DashboardMetrics>(
            r#"
            WITH org_locations AS (
                SELECT id FROM locations WHERE organization_id = $1
            )
            SELECT
                (SELECT COUNT(*) FROM org_locations) AS locations,
                (SELECT COUNT(*) FROM tags WHERE organization_id = $1) AS tags,
                (SELECT COUNT(*) FROM links WHERE location_id IN (SELECT id FROM org_locations)) AS links,
                (SELECT COUNT(*) FROM links
                  WHERE location_id IN (SELECT id FROM org_locations) AND is_active = TRUE) AS active_links,
                (SELECT COUNT(*) FROM link_clicks
                  WHERE location_id IN (SELECT id FROM org_locations)) AS clicks_total,
                (SELECT COUNT(*) FROM link_clicks
                  WHERE location_id IN (SELECT id FROM org_locations)
                    AND created_at >= NOW() - INTERVAL '7 days') AS clicks_7d
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(metrics)
    }

    pub async fn global_counts(&self) -> Result<GlobalCounts, AppError> {
        let counts = sqlx::query_as::<_, GlobalCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM organizations) AS organizations,
                (SELECT COUNT(*) FROM locations) AS locations,
                (SELECT COUNT(*) FROM tags) AS tags,
                (SELECT COUNT(*) FROM links) AS links,
                (SELECT COUNT(*) FROM memberships) AS memberships
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
