// src/models/link.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "link_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LinkCategory {
    Payment,
    #[default]
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    DigitalWallet,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "featured_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeaturedType {
    Instagram,
    Youtube,
    Site,
}

impl FeaturedType {
    pub fn label(&self) -> &'static str {
        match self {
            FeaturedType::Instagram => "Instagram",
            FeaturedType::Youtube => "YouTube",
            FeaturedType::Site => "Site",
        }
    }

    pub fn icon_url(&self) -> &'static str {
        match self {
            FeaturedType::Instagram => "https://cdn.simpleicons.org/instagram/111111",
            FeaturedType::Youtube => "https://cdn.simpleicons.org/youtube/111111",
            FeaturedType::Site => "https://cdn.simpleicons.org/googlechrome/111111",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440020")]
    pub id: Uuid,

    pub location_id: Uuid,

    #[schema(example = "Oferta via PIX")]
    pub title: String,

    #[schema(example = "https://nubank.com.br/pagar/abc")]
    pub url: String,

    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: LinkCategory,
    pub method: Option<PaymentMethod>,
    pub featured_type: Option<FeaturedType>,

    #[schema(example = 1)]
    pub sort_order: i32,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[schema(example = "Oferta via PIX")]
    pub title: String,

    #[validate(length(min = 1, message = "A URL é obrigatória."))]
    #[schema(example = "nubank.com.br/pagar/abc")]
    pub url: String,

    pub description: Option<String>,
    pub icon_url: Option<String>,

    #[serde(default)]
    pub category: LinkCategory,

    pub method: Option<PaymentMethod>,
    pub featured_type: Option<FeaturedType>,

    #[serde(default)]
    #[schema(example = 1)]
    pub sort_order: i32,
}

impl LinkPayload {
    // Método de pagamento só faz sentido em links de pagamento
    pub fn effective_method(&self) -> Option<PaymentMethod> {
        match self.category {
            LinkCategory::Payment => self.method.or(Some(PaymentMethod::Pix)),
            LinkCategory::Generic => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkPayload {
    pub location_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub link: LinkPayload,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LinkListQuery {
    pub location_id: Uuid,
}
