// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::membership::MembershipRole,
};

// A igreja (única) do usuário logado e o papel dele nela.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    pub organization_id: Uuid,
    pub role: MembershipRole,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .copied()
            .ok_or_else(|| AppError::Forbidden("Nenhuma organização vinculada.".into()))
    }
}

/// Roda depois do `auth_guard`: resolve o vínculo do usuário e injeta o `TenantContext`.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or(AppError::InvalidToken)?;

    let membership = app_state
        .membership_repo
        .find_for_user(user.0.id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Nenhuma organização vinculada.".into()))?;

    request.extensions_mut().insert(TenantContext {
        organization_id: membership.organization_id,
        role: membership.role,
    });

    Ok(next.run(request).await)
}
