// src/handlers/auth.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::MeResponse,
    services::policy::is_super_admin,
};

// GET /api/me
// Perfil do usuário logado: vínculo (se houver) e se é super-admin.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = MeResponse),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MeResponse>, AppError> {
    let membership = app_state.membership_repo.find_for_user(user.0.id).await?;

    let organization = match &membership {
        Some(m) => app_state.organization_repo.find_by_id(m.organization_id).await?,
        None => None,
    };

    Ok(Json(MeResponse {
        id: user.0.id,
        email: user.0.email.clone(),
        organization,
        role: membership.map(|m| m.role),
        is_super_admin: is_super_admin(&app_state.rbac_repo, user.0.id).await,
    }))
}
