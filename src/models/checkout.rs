// src/models/checkout.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// `amount` chega como número, mas aceitamos qualquer JSON e validamos no serviço
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutPayload {
    #[schema(example = "graca")]
    pub slug: Option<String>,

    #[schema(value_type = f64, example = 50.0)]
    #[serde(default)]
    pub amount: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    #[schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1")]
    pub url: String,
}
