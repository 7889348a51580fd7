// src/services/identity.rs

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

// Marca de origem gravada nos metadados do convite
pub const INVITED_VIA: &str = "tapchurch_admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationRequest {
    pub email: String,
    pub organization_id: Uuid,
    pub redirect_to: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("{0}")]
    Rejected(String),

    #[error("Falha de comunicação com o provedor de identidade: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Provedor de identidade externo. Aqui só precisamos do envio de convites por e-mail.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn invite_user_by_email(&self, request: &InvitationRequest) -> Result<(), IdentityError>;
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

/// Cliente da API administrativa (GoTrue) usando a chave de serviço.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

impl HttpIdentityProvider {
    pub fn new(http: reqwest::Client, base_url: String, service_role_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn invite_user_by_email(&self, request: &InvitationRequest) -> Result<(), IdentityError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/invite", self.base_url))
            .query(&[("redirect_to", request.redirect_to.as_str())])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&json!({
                "email": request.email,
                "data": {
                    "organization_id": request.organization_id,
                    "invited_via": INVITED_VIA,
                }
            }))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = response
            .json::<ProviderErrorBody>()
            .await
            .ok()
            .and_then(|b| b.msg.or(b.message).or(b.error_description))
            .unwrap_or_else(|| format!("HTTP {}", status));

        Err(IdentityError::Rejected(message))
    }
}
