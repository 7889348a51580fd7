// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        rbac::{CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::dashboard::DashboardMetrics,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores da igreja", body = DashboardMetrics)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
) -> Result<Json<DashboardMetrics>, AppError> {
    let metrics = app_state
        .dashboard_repo
        .organization_metrics(tenant.organization_id)
        .await?;

    Ok(Json(metrics))
}
