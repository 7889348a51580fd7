// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::organization::OrganizationSummary;

// Indicadores do painel da igreja
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[schema(example = 2)]
    pub locations: i64,
    #[schema(example = 4)]
    pub tags: i64,
    #[schema(example = 9)]
    pub links: i64,
    #[schema(example = 7)]
    pub active_links: i64,
    #[schema(example = 1520)]
    pub clicks_total: i64,
    #[schema(example = 134)]
    pub clicks_7d: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCounts {
    pub organizations: i64,
    pub locations: i64,
    pub tags: i64,
    pub links: i64,
    pub memberships: i64,
}

// Painel global do super-admin
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    #[serde(flatten)]
    pub counts: GlobalCounts,
    pub recent_organizations: Vec<OrganizationSummary>,
}
