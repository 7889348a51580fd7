// src/services/payment.rs

use async_trait::async_trait;
use serde::Deserialize;

const STRIPE_CHECKOUT_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Pedido de sessão de checkout hospedado, já com valores em centavos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub organization_name: String,
    pub organization_slug: String,
    pub amount_cents: i64,
    pub application_fee_cents: i64,
    pub destination_account: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutSessionRequest {
    /// Corpo `application/x-www-form-urlencoded` no formato aninhado da Stripe.
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", "brl".to_string()),
            ("line_items[0][price_data][unit_amount]", self.amount_cents.to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                format!("Oferta - {}", self.organization_name),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                "Contribuicao via TAP Church".to_string(),
            ),
            (
                "payment_intent_data[application_fee_amount]",
                self.application_fee_cents.to_string(),
            ),
            (
                "payment_intent_data[transfer_data][destination]",
                self.destination_account.clone(),
            ),
            ("metadata[church_slug]", self.organization_slug.clone()),
            ("metadata[platform]", "tapchurch".to_string()),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// O processador recusou; a mensagem dele (quando houver) é repassada ao visitante.
    #[error("{}", .0.as_deref().unwrap_or("Falha ao criar Checkout."))]
    Rejected(Option<String>),

    #[error("Falha de comunicação com o processador: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Cria a sessão e devolve a URL do checkout hospedado.
    async fn create_checkout_session(&self, request: &CheckoutSessionRequest) -> Result<String, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutResponse {
    url: Option<String>,
    error: Option<StripeErrorBody>,
}

pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(http: reqwest::Client, secret_key: String) -> Self {
        Self { http, secret_key }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(&self, request: &CheckoutSessionRequest) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(STRIPE_CHECKOUT_URL)
            .bearer_auth(&self.secret_key)
            .form(&request.form_params())
            .send()
            .await?;

        let ok = response.status().is_success();
        let body: StripeCheckoutResponse = response.json().await?;

        match body.url {
            Some(url) if ok => Ok(url),
            _ => Err(GatewayError::Rejected(body.error.and_then(|e| e.message))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutSessionRequest {
        CheckoutSessionRequest {
            organization_name: "Igreja da Graça".into(),
            organization_slug: "graca".into(),
            amount_cents: 5000,
            application_fee_cents: 50,
            destination_account: "acct_123".into(),
            success_url: "https://app/link/graca?status=success".into(),
            cancel_url: "https://app/link/graca?status=cancelled".into(),
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn form_carries_amount_fee_and_destination() {
        let params = request().form_params();
        assert_eq!(param(&params, "mode"), "payment");
        assert_eq!(param(&params, "line_items[0][price_data][unit_amount]"), "5000");
        assert_eq!(param(&params, "line_items[0][price_data][currency]"), "brl");
        assert_eq!(param(&params, "payment_intent_data[application_fee_amount]"), "50");
        assert_eq!(param(&params, "payment_intent_data[transfer_data][destination]"), "acct_123");
        assert_eq!(
            param(&params, "line_items[0][price_data][product_data][name]"),
            "Oferta - Igreja da Graça"
        );
        assert_eq!(param(&params, "metadata[church_slug]"), "graca");
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        assert_eq!(GatewayError::Rejected(None).to_string(), "Falha ao criar Checkout.");
        assert_eq!(
            GatewayError::Rejected(Some("No such destination".into())).to_string(),
            "No such destination"
        );
    }
}
