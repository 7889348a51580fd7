// src/handlers/admin.rs
// Console do super-admin. Todas as rotas passam pelo `super_admin_guard`,
// exceto o convite, que faz a própria checagem (fail-closed) no serviço.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        dashboard::GlobalMetrics,
        membership::{InvitePayload, OkResponse},
        organization::{CreateClientPayload, CreateClientResponse},
    },
};

const RECENT_ORGANIZATIONS: i64 = 20;

// GET /api/admin/metrics
#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    tag = "Admin",
    responses(
        (status = 200, description = "Números globais da plataforma", body = GlobalMetrics),
        (status = 403, description = "Acesso negado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(State(app_state): State<AppState>) -> Result<Json<GlobalMetrics>, AppError> {
    let counts = app_state.dashboard_repo.global_counts().await?;
    let recent_organizations = app_state
        .organization_repo
        .list_recent(RECENT_ORGANIZATIONS)
        .await?;

    Ok(Json(GlobalMetrics { counts, recent_organizations }))
}

// POST /api/admin/organizations
#[utoipa::path(
    post,
    path = "/api/admin/organizations",
    tag = "Admin",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado (avisos em caso de falha parcial)", body = CreateClientResponse),
        (status = 409, description = "Slug em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.organization_service.create_client(&payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// DELETE /api/admin/organizations/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/organizations/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da igreja")),
    responses(
        (status = 200, description = "Igreja removida em cascata", body = OkResponse),
        (status = 404, description = "Nenhuma organização foi removida")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_organization(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    app_state.organization_service.delete_organization(id).await?;
    Ok(Json(OkResponse { ok: true }))
}

// POST /api/admin/invite
#[utoipa::path(
    post,
    path = "/api/admin/invite",
    tag = "Admin",
    request_body = InvitePayload,
    responses(
        (status = 200, description = "Convite enviado", body = OkResponse),
        (status = 400, description = "Campos ausentes ou erro do provedor"),
        (status = 401, description = "Token inválido ou ausente"),
        (status = 403, description = "Acesso negado")
    ),
    security(("api_jwt" = []))
)]
pub async fn invite(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<AppJson<InvitePayload>, AppError>,
) -> Result<Json<OkResponse>, AppError> {
    app_state.invite_service.ensure_configured()?;
    let AppJson(payload) = payload?;

    app_state.invite_service.dispatch(&user.0, &payload).await?;
    Ok(Json(OkResponse { ok: true }))
}
