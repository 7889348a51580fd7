// src/models/location.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O local físico (Sede, Filial). Cada um tem o próprio micro-site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440010")]
    pub id: Uuid,

    // Nunca editável depois de criado
    #[schema(ignore)]
    pub organization_id: Uuid,

    #[schema(example = "Sede Centro")]
    pub name: String,

    #[schema(example = "sede")]
    pub slug: String,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub address: Option<String>,

    #[schema(example = "Bem-vindo à Sede!")]
    pub welcome_title: Option<String>,

    pub welcome_text: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[validate(length(min = 1, message = "O nome da localidade é obrigatório."))]
    #[schema(example = "Sede Centro")]
    pub name: String,

    #[schema(example = "sede")]
    pub slug: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWelcomePayload {
    #[schema(example = "Bem-vindo à Sede!")]
    pub welcome_title: Option<String>,

    #[schema(example = "Toque na tag para ofertar e acompanhar os avisos.")]
    pub welcome_text: Option<String>,
}
