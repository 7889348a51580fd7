// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{membership::MembershipRole, organization::Organization};

// Identidade resolvida a partir do token do provedor de identidade.
// Não existe tabela de usuários local.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "pastor@graca.org")]
    pub email: Option<String>,
}

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,            // Subject (ID do usuário)
    pub email: Option<String>,
    pub aud: String,          // Audience ("authenticated")
    pub exp: usize,           // Expiration time
    pub iat: usize,           // Issued At
}

// Resposta do /api/me (página de perfil)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub organization: Option<Organization>,
    pub role: Option<MembershipRole>,
    pub is_super_admin: bool,
}
