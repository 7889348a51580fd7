// src/handlers/links.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::AppJson,
        url_utils::{blank_to_none, normalize_url},
    },
    config::AppState,
    middleware::{
        rbac::{CanManageLinks, CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::link::{CreateLinkPayload, Link, LinkListQuery, LinkPayload},
};

fn link_not_found() -> AppError {
    AppError::NotFound("Link não encontrado.".into())
}

// Limpa os opcionais e devolve a URL já normalizada
fn prepare(payload: &mut LinkPayload) -> String {
    payload.title = payload.title.trim().to_string();
    payload.description = blank_to_none(payload.description.take());
    payload.icon_url = blank_to_none(payload.icon_url.take());
    normalize_url(&payload.url)
}

// GET /api/links?locationId=
#[utoipa::path(
    get,
    path = "/api/links",
    tag = "Links",
    params(LinkListQuery),
    responses(
        (status = 200, description = "Links da localidade, na ordem de exibição", body = Vec<Link>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_links(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
    Query(query): Query<LinkListQuery>,
) -> Result<Json<Vec<Link>>, AppError> {
    let links = app_state
        .link_repo
        .list_for_location(tenant.organization_id, query.location_id)
        .await?;
    Ok(Json(links))
}

// POST /api/links
#[utoipa::path(
    post,
    path = "/api/links",
    tag = "Links",
    request_body = CreateLinkPayload,
    responses(
        (status = 201, description = "Link criado", body = Link),
        (status = 404, description = "Localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_link(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLinks>,
    AppJson(mut payload): AppJson<CreateLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let url = prepare(&mut payload.link);

    let link = app_state
        .link_repo
        .create(
            &app_state.db_pool,
            tenant.organization_id,
            payload.location_id,
            &payload.link,
            &url,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Localidade não encontrada.".into()))?;

    Ok((StatusCode::CREATED, Json(link)))
}

// PUT /api/links/{id}
#[utoipa::path(
    put,
    path = "/api/links/{id}",
    tag = "Links",
    request_body = LinkPayload,
    params(("id" = Uuid, Path, description = "ID do link")),
    responses(
        (status = 200, description = "Link atualizado", body = Link),
        (status = 404, description = "Link não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_link(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLinks>,
    Path(id): Path<Uuid>,
    AppJson(mut payload): AppJson<LinkPayload>,
) -> Result<Json<Link>, AppError> {
    payload.validate()?;
    let url = prepare(&mut payload);

    let link = app_state
        .link_repo
        .update(&app_state.db_pool, tenant.organization_id, id, &payload, &url)
        .await?
        .ok_or_else(link_not_found)?;

    Ok(Json(link))
}

// POST /api/links/{id}/toggle
#[utoipa::path(
    post,
    path = "/api/links/{id}/toggle",
    tag = "Links",
    params(("id" = Uuid, Path, description = "ID do link")),
    responses(
        (status = 200, description = "Link ativado/desativado", body = Link),
        (status = 404, description = "Link não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_link(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLinks>,
    Path(id): Path<Uuid>,
) -> Result<Json<Link>, AppError> {
    let link = app_state
        .link_repo
        .toggle_active(&app_state.db_pool, tenant.organization_id, id)
        .await?
        .ok_or_else(link_not_found)?;

    tracing::info!("🔗 Link {} agora está {}", id, if link.is_active { "ativo" } else { "inativo" });
    Ok(Json(link))
}

// DELETE /api/links/{id}
#[utoipa::path(
    delete,
    path = "/api/links/{id}",
    tag = "Links",
    params(("id" = Uuid, Path, description = "ID do link")),
    responses(
        (status = 204, description = "Link removido"),
        (status = 404, description = "Link não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_link(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageLinks>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.link_repo.delete(&app_state.db_pool, tenant.organization_id, id).await? == 0 {
        return Err(link_not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::link::LinkCategory;

    #[test]
    fn prepare_cleans_optionals_and_normalizes_url() {
        let mut payload = LinkPayload {
            title: "  Site  ".into(),
            url: "graca.org".into(),
            description: Some("   ".into()),
            icon_url: Some("".into()),
            category: LinkCategory::Generic,
            method: None,
            featured_type: None,
            sort_order: 0,
        };

        assert_eq!(prepare(&mut payload), "https://graca.org");
        assert_eq!(payload.title, "Site");
        assert_eq!(payload.description, None);
        assert_eq!(payload.icon_url, None);
    }
}
