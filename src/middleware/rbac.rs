// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    services::policy::{is_super_admin, Capability},
};

/// 1. O trait que associa um tipo a uma capacidade
pub trait CapabilityDef: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

/// 2. O extrator (guardião). Avaliado antes de qualquer mutação.
pub struct RequireCapability<C>(pub PhantomData<C>);

impl<C, S> FromRequestParts<S> for RequireCapability<C>
where
    C: CapabilityDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant = parts
            .extensions
            .get::<TenantContext>()
            .ok_or_else(|| AppError::Forbidden("Nenhuma organização vinculada.".into()))?;

        if !tenant.role.allows(C::CAPABILITY) {
            return Err(AppError::Forbidden(format!(
                "Você precisa da permissão '{}' para realizar esta ação.",
                C::CAPABILITY.slug()
            )));
        }

        Ok(RequireCapability(PhantomData))
    }
}

/// Roda depois do `auth_guard` nas rotas do console.
pub async fn super_admin_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or(AppError::InvalidToken)?;

    if !is_super_admin(&app_state.rbac_repo, user.0.id).await {
        return Err(AppError::Forbidden("Acesso negado.".into()));
    }

    Ok(next.run(request).await)
}

// ---
// DEFINIÇÃO DAS CAPACIDADES (TIPOS)
// ---

pub struct CanReadOrganization;
impl CapabilityDef for CanReadOrganization {
    const CAPABILITY: Capability = Capability::ReadOrganization;
}

pub struct CanManageLinks;
impl CapabilityDef for CanManageLinks {
    const CAPABILITY: Capability = Capability::ManageLinks;
}

pub struct CanManageTags;
impl CapabilityDef for CanManageTags {
    const CAPABILITY: Capability = Capability::ManageTags;
}

pub struct CanManageLocations;
impl CapabilityDef for CanManageLocations {
    const CAPABILITY: Capability = Capability::ManageLocations;
}

pub struct CanManageBranding;
impl CapabilityDef for CanManageBranding {
    const CAPABILITY: Capability = Capability::ManageBranding;
}

pub struct CanManageTeam;
impl CapabilityDef for CanManageTeam {
    const CAPABILITY: Capability = Capability::ManageTeam;
}
