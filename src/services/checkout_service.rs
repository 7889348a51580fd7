// src/services/checkout_service.rs

use std::sync::Arc;

use serde_json::Value;

use crate::{
    common::error::AppError,
    db::PublicStore,
    models::checkout::CheckoutPayload,
    services::payment::{CheckoutSessionRequest, GatewayError, PaymentGateway},
};

/// Oferta mínima: R$ 1,00.
pub const MIN_AMOUNT_CENTS: i64 = 100;

// Take rate da plataforma: 1% do valor ofertado
const PLATFORM_FEE_RATE: f64 = 0.01;

/// Converte o valor em reais para centavos. `None` para não numérico, não finito ou <= 0.
/// Strings numéricas são aceitas, como o formulário público envia às vezes.
pub fn parse_amount_to_cents(amount: &Value) -> Option<i64> {
    let value = match amount {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };

    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    Some((value * 100.0).round() as i64)
}

/// 1% com piso de 1 centavo.
pub fn platform_fee(amount_cents: i64) -> i64 {
    ((amount_cents as f64 * PLATFORM_FEE_RATE).round() as i64).max(1)
}

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<dyn PublicStore>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    app_url: Option<String>,
}

impl CheckoutService {
    pub fn new(
        store: Arc<dyn PublicStore>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        app_url: Option<String>,
    ) -> Self {
        Self { store, gateway, app_url }
    }

    /// Falha fechada sem chave do processador ou URL da aplicação.
    /// O handler chama antes mesmo de ler o corpo.
    pub fn ensure_configured(&self) -> Result<(), AppError> {
        self.configuration().map(|_| ())
    }

    fn configuration(&self) -> Result<(&Arc<dyn PaymentGateway>, &str), AppError> {
        match (&self.gateway, &self.app_url) {
            (Some(gateway), Some(app_url)) => Ok((gateway, app_url.as_str())),
            _ => Err(AppError::Config("Configuracao incompleta de variaveis de ambiente.".into())),
        }
    }

    /// Abre uma sessão de checkout para a igreja e devolve a URL hospedada.
    pub async fn create_checkout(&self, payload: &CheckoutPayload) -> Result<String, AppError> {
        // Configuração primeiro: nada de rede sem ela
        let (gateway, app_url) = self.configuration()?;

        let slug = payload
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("Slug da igreja é obrigatório.".into()))?;

        let amount_cents = parse_amount_to_cents(&payload.amount)
            .filter(|cents| *cents >= MIN_AMOUNT_CENTS)
            .ok_or_else(|| AppError::BadRequest("Valor mínimo da oferta: R$ 1,00.".into()))?;

        let organization = self
            .store
            .find_checkout_organization(slug)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AppError::NotFound("Igreja não encontrada.".into()))?;

        let destination_account = organization
            .payment_account_id
            .filter(|acct| !acct.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Conta de pagamento da igreja não configurada.".into()))?;

        let app_url = app_url.trim_end_matches('/');
        let request = CheckoutSessionRequest {
            organization_name: organization.name,
            organization_slug: organization.slug.clone(),
            amount_cents,
            application_fee_cents: platform_fee(amount_cents),
            destination_account,
            success_url: format!("{}/link/{}?status=success", app_url, organization.slug),
            cancel_url: format!("{}/link/{}?status=cancelled", app_url, organization.slug),
        };

        let url = gateway
            .create_checkout_session(&request)
            .await
            .map_err(|e| match e {
                GatewayError::Rejected(_) => AppError::Upstream(e.to_string()),
                GatewayError::Transport(_) => AppError::InternalServerError(anyhow::Error::new(e)),
            })?;

        tracing::info!(
            "💳 Checkout criado para '{}' ({} centavos, taxa {})",
            request.organization_slug,
            request.amount_cents,
            request.application_fee_cents
        );

        Ok(url)
    }
}
