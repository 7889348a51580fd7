// src/handlers/locations.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson, slug::slug_or_name, url_utils::blank_to_none},
    config::AppState,
    middleware::{
        rbac::{CanManageLocations, CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::location::{Location, LocationPayload},
    services::qr_code,
};

fn location_not_found() -> AppError {
    AppError::NotFound("Localidade não encontrada.".into())
}

fn location_slug(payload: &LocationPayload) -> Result<String, AppError> {
    let slug = slug_or_name(payload.slug.as_deref(), &payload.name);
    if slug.is_empty() {
        return Err(AppError::BadRequest("Slug inválido: use letras ou números.".into()));
    }
    Ok(slug)
}

// GET /api/locations
#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "Localidades",
    responses(
        (status = 200, description = "Localidades da igreja", body = Vec<Location>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_locations(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
) -> Result<Json<Vec<Location>>, AppError> {
    let locations = app_state.location_repo.list(tenant.organization_id).await?;
    Ok(Json(locations))
}

// POST /api/locations
#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "Localidades",
    request_body = LocationPayload,
    responses(
        (status = 201, description = "Localidade criada", body = Location),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Slug já usado nesta igreja")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLocations>,
    AppJson(payload): AppJson<LocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let slug = location_slug(&payload)?;
    let address = blank_to_none(payload.address.clone());

    let location = app_state
        .location_repo
        .create(
            &app_state.db_pool,
            tenant.organization_id,
            payload.name.trim(),
            &slug,
            address.as_deref(),
        )
        .await?;

    tracing::info!("📍 Localidade '{}' criada", location.slug);
    Ok((StatusCode::CREATED, Json(location)))
}

// PUT /api/locations/{id}
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = "Localidades",
    request_body = LocationPayload,
    params(("id" = Uuid, Path, description = "ID da localidade")),
    responses(
        (status = 200, description = "Localidade atualizada", body = Location),
        (status = 404, description = "Localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_location(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLocations>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<LocationPayload>,
) -> Result<Json<Location>, AppError> {
    payload.validate()?;
    let slug = location_slug(&payload)?;
    let address = blank_to_none(payload.address.clone());

    let location = app_state
        .location_repo
        .update(
            &app_state.db_pool,
            tenant.organization_id,
            id,
            payload.name.trim(),
            &slug,
            address.as_deref(),
        )
        .await?
        .ok_or_else(location_not_found)?;

    Ok(Json(location))
}

// DELETE /api/locations/{id}
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = "Localidades",
    params(("id" = Uuid, Path, description = "ID da localidade")),
    responses(
        (status = 204, description = "Localidade removida"),
        (status = 404, description = "Localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLocations>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = app_state
        .location_repo
        .delete(&app_state.db_pool, tenant.organization_id, id)
        .await?;
    if removed == 0 {
        return Err(location_not_found());
    }

    tracing::info!("🗑️ Localidade {} removida", id);
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/locations/{id}/qrcode
// QR Code do micro-site para imprimir junto da tag NFC.
#[utoipa::path(
    get,
    path = "/api/locations/{id}/qrcode",
    tag = "Localidades",
    params(("id" = Uuid, Path, description = "ID da localidade")),
    responses(
        (status = 200, description = "QR Code em SVG", body = String, content_type = "image/svg+xml"),
        (status = 404, description = "Localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn location_qrcode(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let location = app_state
        .location_repo
        .find(tenant.organization_id, id)
        .await?
        .ok_or_else(location_not_found)?;

    let organization = app_state
        .organization_repo
        .find_by_id(tenant.organization_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Igreja não encontrada.".into()))?;

    let url = qr_code::public_page_url(
        &app_state.config.public_site_url(),
        &organization.slug,
        &location.slug,
    );
    let svg = qr_code::render_svg(&url)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
