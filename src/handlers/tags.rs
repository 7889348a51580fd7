// src/handlers/tags.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson, url_utils::blank_to_none},
    config::AppState,
    middleware::{
        rbac::{CanManageTags, CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::tag::{Tag, TagPayload},
};

// GET /api/tags
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "Tags NFC",
    responses(
        (status = 200, description = "Tags da igreja", body = Vec<Tag>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tags(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = app_state.tag_repo.list(tenant.organization_id).await?;
    Ok(Json(tags))
}

// POST /api/tags
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "Tags NFC",
    request_body = TagPayload,
    responses(
        (status = 201, description = "Tag registrada", body = Tag),
        (status = 404, description = "Localidade não pertence à igreja"),
        (status = 409, description = "Código já registrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tag(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTags>,
    AppJson(payload): AppJson<TagPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let label = blank_to_none(payload.label.clone());

    let tag = app_state
        .tag_repo
        .create(
            &app_state.db_pool,
            tenant.organization_id,
            payload.code.trim(),
            label.as_deref(),
            payload.location_id,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Localidade não encontrada.".into()))?;

    Ok((StatusCode::CREATED, Json(tag)))
}

// PUT /api/tags/{id}
#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    tag = "Tags NFC",
    request_body = TagPayload,
    params(("id" = Uuid, Path, description = "ID da tag")),
    responses(
        (status = 200, description = "Tag atualizada", body = Tag),
        (status = 404, description = "Tag ou localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tag(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTags>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<TagPayload>,
) -> Result<Json<Tag>, AppError> {
    payload.validate()?;
    let label = blank_to_none(payload.label.clone());

    let tag = app_state
        .tag_repo
        .update(
            &app_state.db_pool,
            tenant.organization_id,
            id,
            payload.code.trim(),
            label.as_deref(),
            payload.location_id,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Tag ou localidade não encontrada.".into()))?;

    Ok(Json(tag))
}

// DELETE /api/tags/{id}
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = "Tags NFC",
    params(("id" = Uuid, Path, description = "ID da tag")),
    responses(
        (status = 204, description = "Tag removida"),
        (status = 404, description = "Tag não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tag(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageTags>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.tag_repo.delete(&app_state.db_pool, tenant.organization_id, id).await? == 0 {
        return Err(AppError::NotFound("Tag não encontrada.".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
