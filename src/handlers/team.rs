// src/handlers/team.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageTeam, CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::membership::{AddMemberPayload, Membership, UpdateMemberRolePayload},
    services::policy::check_role_change,
};

fn member_not_found() -> AppError {
    AppError::NotFound("Membro não encontrado.".into())
}

// GET /api/team
#[utoipa::path(
    get,
    path = "/api/team",
    tag = "Equipe",
    responses(
        (status = 200, description = "Membros da igreja", body = Vec<Membership>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
) -> Result<Json<Vec<Membership>>, AppError> {
    let members = app_state.membership_repo.list(tenant.organization_id).await?;
    Ok(Json(members))
}

// POST /api/team
#[utoipa::path(
    post,
    path = "/api/team",
    tag = "Equipe",
    request_body = AddMemberPayload,
    responses(
        (status = 201, description = "Membro adicionado", body = Membership),
        (status = 403, description = "Somente o dono concede o papel de dono"),
        (status = 409, description = "Usuário já pertence a uma igreja")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_member(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTeam>,
    AppJson(payload): AppJson<AddMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    check_role_change(tenant.role, None, payload.role)?;

    let membership = app_state
        .membership_repo
        .add(&app_state.db_pool, tenant.organization_id, payload.user_id, payload.role)
        .await?;

    tracing::info!("👥 Usuário {} adicionado à igreja {}", payload.user_id, tenant.organization_id);
    Ok((StatusCode::CREATED, Json(membership)))
}

// PUT /api/team/{id}
#[utoipa::path(
    put,
    path = "/api/team/{id}",
    tag = "Equipe",
    request_body = UpdateMemberRolePayload,
    params(("id" = Uuid, Path, description = "ID do vínculo")),
    responses(
        (status = 200, description = "Papel atualizado", body = Membership),
        (status = 403, description = "Somente o dono altera o papel de dono"),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member_role(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTeam>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateMemberRolePayload>,
) -> Result<Json<Membership>, AppError> {
    let current = app_state
        .membership_repo
        .find(tenant.organization_id, id)
        .await?
        .ok_or_else(member_not_found)?;
    check_role_change(tenant.role, Some(current.role), payload.role)?;

    let membership = app_state
        .membership_repo
        .update_role(&app_state.db_pool, tenant.organization_id, id, payload.role)
        .await?
        .ok_or_else(member_not_found)?;

    Ok(Json(membership))
}

// DELETE /api/team/{id}
#[utoipa::path(
    delete,
    path = "/api/team/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do vínculo")),
    responses(
        (status = 204, description = "Membro removido"),
        (status = 400, description = "Não é possível remover a si mesmo"),
        (status = 403, description = "Somente o dono remove outro dono"),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTeam>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let membership = app_state
        .membership_repo
        .find(tenant.organization_id, id)
        .await?
        .ok_or_else(member_not_found)?;

    if membership.user_id == user.0.id {
        return Err(AppError::BadRequest("Você não pode remover a si mesmo.".into()));
    }
    if !tenant.role.can_manage_member(membership.role) {
        return Err(AppError::Forbidden("Somente o dono pode remover outro dono.".into()));
    }

    let removed = app_state
        .membership_repo
        .delete(&app_state.db_pool, tenant.organization_id, id)
        .await?;
    if removed == 0 {
        return Err(member_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
