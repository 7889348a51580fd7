// src/handlers/settings.rs

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson, url_utils::blank_to_none},
    config::AppState,
    middleware::{
        rbac::{CanManageBranding, CanReadOrganization, RequireCapability},
        tenancy::TenantContext,
    },
    models::{
        location::{Location, UpdateWelcomePayload},
        organization::{Organization, UpdateBrandingPayload, UpdatePaymentAccountPayload},
    },
};

fn organization_not_found() -> AppError {
    AppError::NotFound("Igreja não encontrada.".into())
}

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Configurações",
    responses(
        (status = 200, description = "Dados da igreja", body = Organization)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanReadOrganization>,
) -> Result<Json<Organization>, AppError> {
    let organization = app_state
        .organization_repo
        .find_by_id(tenant.organization_id)
        .await?
        .ok_or_else(organization_not_found)?;

    Ok(Json(organization))
}

// PUT /api/settings/branding
// Campos vazios do formulário são gravados como NULL.
#[utoipa::path(
    put,
    path = "/api/settings/branding",
    tag = "Configurações",
    request_body = UpdateBrandingPayload,
    responses(
        (status = 200, description = "Identidade visual atualizada", body = Organization),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_branding(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageBranding>,
    AppJson(payload): AppJson<UpdateBrandingPayload>,
) -> Result<Json<Organization>, AppError> {
    let payload = UpdateBrandingPayload {
        logo_url: blank_to_none(payload.logo_url),
        primary_color: blank_to_none(payload.primary_color),
        accent_color: blank_to_none(payload.accent_color),
        contact_email: blank_to_none(payload.contact_email),
        contact_phone: blank_to_none(payload.contact_phone),
    };
    payload.validate()?;

    let organization = app_state
        .organization_repo
        .update_branding(&app_state.db_pool, tenant.organization_id, &payload)
        .await?
        .ok_or_else(organization_not_found)?;

    Ok(Json(organization))
}

// PUT /api/settings/payment-account
#[utoipa::path(
    put,
    path = "/api/settings/payment-account",
    tag = "Configurações",
    request_body = UpdatePaymentAccountPayload,
    responses(
        (status = 200, description = "Conta de pagamento vinculada", body = Organization),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment_account(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageBranding>,
    AppJson(mut payload): AppJson<UpdatePaymentAccountPayload>,
) -> Result<Json<Organization>, AppError> {
    payload.payment_account_id = payload.payment_account_id.trim().to_string();
    payload.validate()?;

    let organization = app_state
        .organization_repo
        .update_payment_account(
            &app_state.db_pool,
            tenant.organization_id,
            &payload.payment_account_id,
        )
        .await?
        .ok_or_else(organization_not_found)?;

    tracing::info!("💳 Conta de pagamento da igreja {} atualizada", tenant.organization_id);
    Ok(Json(organization))
}

// PUT /api/locations/{id}/welcome
#[utoipa::path(
    put,
    path = "/api/locations/{id}/welcome",
    tag = "Configurações",
    request_body = UpdateWelcomePayload,
    params(("id" = Uuid, Path, description = "ID da localidade")),
    responses(
        (status = 200, description = "Boas-vindas atualizadas", body = Location),
        (status = 404, description = "Localidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_welcome(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    _guard: RequireCapability<CanManageBranding>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateWelcomePayload>,
) -> Result<Json<Location>, AppError> {
    let title = blank_to_none(payload.welcome_title);
    let text = blank_to_none(payload.welcome_text);

    let location = app_state
        .location_repo
        .update_welcome(
            &app_state.db_pool,
            tenant.organization_id,
            id,
            title.as_deref(),
            text.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Localidade não encontrada.".into()))?;

    Ok(Json(location))
}
