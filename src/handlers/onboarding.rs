// src/handlers/onboarding.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        membership::Membership,
        organization::{CreateOrganizationPayload, Organization},
    },
};

// POST /api/onboarding
// O usuário recém-cadastrado cria a própria igreja e vira dono dela.
#[utoipa::path(
    post,
    path = "/api/onboarding",
    tag = "Onboarding",
    request_body = CreateOrganizationPayload,
    responses(
        (status = 201, description = "Igreja criada", body = Organization),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Usuário já vinculado ou slug em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateOrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let organization = app_state
        .organization_service
        .create_with_owner(&user.0, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(organization)))
}

// POST /api/onboarding/accept-invite
#[utoipa::path(
    post,
    path = "/api/onboarding/accept-invite",
    tag = "Onboarding",
    responses(
        (status = 201, description = "Convite aceito", body = Membership),
        (status = 404, description = "Nenhum convite pendente"),
        (status = 409, description = "Usuário já vinculado")
    ),
    security(("api_jwt" = []))
)]
pub async fn accept_invite(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let membership = app_state.organization_service.accept_invite(&user.0).await?;

    Ok((StatusCode::CREATED, Json(membership)))
}
