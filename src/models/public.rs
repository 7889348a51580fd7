// src/models/public.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::link::{FeaturedType, LinkCategory, PaymentMethod};

// Projeções de leitura do micro-site. Nada aqui expõe dados internos (conta de pagamento etc).

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicOrganization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicLocation {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub welcome_title: Option<String>,
    pub welcome_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicLink {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: LinkCategory,
    pub method: Option<PaymentMethod>,
    pub featured_type: Option<FeaturedType>,
}

// Payload composto da página pública. `featured` vai na faixa "Destaques".
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    pub organization: PublicOrganization,
    pub location: PublicLocation,
    pub featured: Vec<PublicLink>,
    pub links: Vec<PublicLink>,
}

// O mínimo que o redirecionamento precisa saber de um link
#[derive(Debug, Clone, FromRow)]
pub struct LinkTarget {
    pub id: Uuid,
    pub url: String,
    pub is_active: bool,
    pub location_id: Uuid,
}

// Dados da igreja necessários para abrir um checkout
#[derive(Debug, Clone, FromRow)]
pub struct CheckoutOrganization {
    pub name: String,
    pub slug: String,
    pub payment_account_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[schema(example = "https://www.tapchurch.com.br")]
    pub site_url: String,
    #[schema(example = "G-XXXXXXX")]
    pub analytics_id: Option<String>,
}
