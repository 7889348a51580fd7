// src/models/tag.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Tag NFC física. Só um registro de rótulo/consulta.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,

    #[schema(ignore)]
    pub organization_id: Uuid,

    pub location_id: Option<Uuid>,

    #[schema(example = "TAP-0001")]
    pub code: String,

    #[schema(example = "Recepção")]
    pub label: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagPayload {
    #[validate(length(min = 1, message = "O código da tag é obrigatório."))]
    #[schema(example = "TAP-0001")]
    pub code: String,

    #[schema(example = "Recepção")]
    pub label: Option<String>,

    pub location_id: Option<Uuid>,
}
