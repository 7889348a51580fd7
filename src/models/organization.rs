// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Organization (A "Igreja")
// ---
// Raiz do tenant. Tudo (localidades, tags, equipe) pendura aqui.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Igreja da Graça")]
    pub name: String,

    #[schema(example = "graca")]
    pub slug: String,

    #[schema(example = "starter")]
    pub plan_name: String,

    #[schema(example = "https://cdn.tapchurch.com.br/logos/graca.png")]
    pub logo_url: Option<String>,

    #[schema(example = "#f4f7fb")]
    pub primary_color: Option<String>,

    #[schema(example = "#0ea5a6")]
    pub accent_color: Option<String>,

    #[schema(example = "contato@graca.org")]
    pub contact_email: Option<String>,

    #[schema(example = "(11) 99999-8888")]
    pub contact_phone: Option<String>,

    #[schema(example = "acct_1Nv0FGQ9RKHgCVdK")]
    pub payment_account_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha resumida para a listagem global do super-admin
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Starter,
    Growth,
    Enterprise,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Starter => "starter",
            Plan::Growth => "growth",
            Plan::Enterprise => "enterprise",
        }
    }
}

// Payload do onboarding: o usuário logado cria a própria igreja
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationPayload {
    #[validate(length(min = 1, message = "O nome da igreja é obrigatório."))]
    #[schema(example = "Igreja Batista Central")]
    pub name: String,

    #[schema(example = "batista-central")]
    pub slug: Option<String>,

    #[serde(default)]
    pub plan_name: Plan,
}

// Payload do super-admin: cria um cliente e, opcionalmente, convida o responsável
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "O nome da igreja é obrigatório."))]
    #[schema(example = "Igreja da Graça")]
    pub name: String,

    #[schema(example = "graca")]
    pub slug: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "pastor@graca.org")]
    pub owner_email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientResponse {
    pub organization: Organization,
    // Falhas parciais (ex: convite não enviado). A organização continua criada.
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandingPayload {
    #[schema(example = "https://cdn.tapchurch.com.br/logos/graca.png")]
    pub logo_url: Option<String>,

    #[schema(example = "#f4f7fb")]
    pub primary_color: Option<String>,

    #[schema(example = "#0ea5a6")]
    pub accent_color: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentAccountPayload {
    #[validate(length(min = 1, message = "A conta de pagamento é obrigatória."))]
    #[schema(example = "acct_1Nv0FGQ9RKHgCVdK")]
    pub payment_account_id: String,
}
