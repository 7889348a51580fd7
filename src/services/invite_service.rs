// src/services/invite_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PlatformRoles,
    models::{auth::User, membership::InvitePayload},
    services::{
        identity::{IdentityError, IdentityProvider, InvitationRequest},
        policy::is_super_admin,
    },
};

/// Despacho de convites por e-mail, restrito a super-admins.
#[derive(Clone)]
pub struct InviteService {
    provider: Option<Arc<dyn IdentityProvider>>,
    roles: Arc<dyn PlatformRoles>,
    site_url: String,
}

impl InviteService {
    pub fn new(
        provider: Option<Arc<dyn IdentityProvider>>,
        roles: Arc<dyn PlatformRoles>,
        site_url: String,
    ) -> Self {
        Self { provider, roles, site_url }
    }

    /// `POST /api/admin/invite`: valida o chamador e pede o convite ao provedor.
    pub async fn dispatch(&self, caller: &User, payload: &InvitePayload) -> Result<(), AppError> {
        let provider = self.provider()?;

        let email = payload.email.trim().to_lowercase();
        let organization_id = payload.organization_id.trim();
        if email.is_empty() || organization_id.is_empty() {
            return Err(AppError::BadRequest("organizationId e email são obrigatórios.".into()));
        }
        let organization_id = Uuid::parse_str(organization_id)
            .map_err(|_| AppError::BadRequest("organizationId inválido.".into()))?;

        if !is_super_admin(self.roles.as_ref(), caller.id).await {
            return Err(AppError::Forbidden("Acesso negado.".into()));
        }

        self.send(provider.as_ref(), &email, organization_id).await?;

        tracing::info!("✉️ Convite enviado para {} (igreja {})", email, organization_id);
        Ok(())
    }

    /// Envia o convite sem checar papéis. Quem chama já passou pelo guard de super-admin.
    pub async fn send_invite(&self, email: &str, organization_id: Uuid) -> Result<(), AppError> {
        let provider = self.provider()?;
        self.send(provider.as_ref(), email, organization_id).await
    }

    pub fn ensure_configured(&self) -> Result<(), AppError> {
        self.provider().map(|_| ())
    }

    fn provider(&self) -> Result<Arc<dyn IdentityProvider>, AppError> {
        self.provider.clone().ok_or_else(|| {
            AppError::Config("Variáveis do provedor de identidade ausentes no servidor.".into())
        })
    }

    async fn send(
        &self,
        provider: &dyn IdentityProvider,
        email: &str,
        organization_id: Uuid,
    ) -> Result<(), AppError> {
        let request = InvitationRequest {
            email: email.to_string(),
            organization_id,
            redirect_to: format!("{}/login", self.site_url),
        };

        provider
            .invite_user_by_email(&request)
            .await
            .map_err(|e| match e {
                IdentityError::Rejected(msg) => {
                    AppError::Upstream(format!("Falha no envio do convite: {}", msg))
                }
                IdentityError::Transport(_) => AppError::InternalServerError(anyhow::Error::new(e)),
            })
    }
}

#[cfg(test)]
pub mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    pub struct RecordingProvider {
        pub sent: Mutex<Vec<InvitationRequest>>,
        pub reject_with: Option<String>,
    }

    #[async_trait]
    impl IdentityProvider for RecordingProvider {
        async fn invite_user_by_email(&self, request: &InvitationRequest) -> Result<(), IdentityError> {
            if let Some(msg) = &self.reject_with {
                return Err(IdentityError::Rejected(msg.clone()));
            }
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    pub struct FixedRoles(pub Result<bool, ()>);

    #[async_trait]
    impl PlatformRoles for FixedRoles {
        async fn is_super_admin(&self, _user_id: Uuid) -> Result<bool, AppError> {
            self.0
                .map_err(|_| AppError::DatabaseError(sqlx::Error::PoolTimedOut))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{test_support::*, *};

    fn caller() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("admin@tapchurch.com.br".into()),
        }
    }

    fn payload(email: &str, org: &str) -> InvitePayload {
        InvitePayload {
            email: email.into(),
            organization_id: org.into(),
        }
    }

    fn service(provider: Arc<RecordingProvider>, roles: Result<bool, ()>) -> InviteService {
        InviteService::new(
            Some(provider),
            Arc::new(FixedRoles(roles)),
            "https://www.tapchurch.com.br".into(),
        )
    }

    #[tokio::test]
    async fn super_admin_invites_with_metadata_and_login_redirect() {
        let provider = Arc::new(RecordingProvider::default());
        let org = Uuid::new_v4();

        service(provider.clone(), Ok(true))
            .dispatch(&caller(), &payload("  Pastor@Graca.org ", &org.to_string()))
            .await
            .unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "pastor@graca.org");
        assert_eq!(sent[0].organization_id, org);
        assert_eq!(sent[0].redirect_to, "https://www.tapchurch.com.br/login");
    }

    #[tokio::test]
    async fn non_admins_are_forbidden() {
        let provider = Arc::new(RecordingProvider::default());
        let org = Uuid::new_v4().to_string();

        for roles in [Ok(false), Err(())] {
            let err = service(provider.clone(), roles)
                .dispatch(&caller(), &payload("pastor@graca.org", &org))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
        assert!(provider.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_bad_requests() {
        let provider = Arc::new(RecordingProvider::default());
        let svc = service(provider, Ok(true));

        for p in [payload("", "x"), payload("a@b.c", " "), payload("a@b.c", "nao-uuid")] {
            assert!(matches!(svc.dispatch(&caller(), &p).await, Err(AppError::BadRequest(_))));
        }
    }

    #[tokio::test]
    async fn provider_errors_are_surfaced() {
        let provider = Arc::new(RecordingProvider {
            reject_with: Some("User already registered".into()),
            ..Default::default()
        });
        let org = Uuid::new_v4().to_string();

        match service(provider, Ok(true)).dispatch(&caller(), &payload("a@b.c", &org)).await {
            Err(AppError::Upstream(msg)) => {
                assert_eq!(msg, "Falha no envio do convite: User already registered")
            }
            other => panic!("esperava Upstream, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_provider_is_a_configuration_error() {
        let svc = InviteService::new(None, Arc::new(FixedRoles(Ok(true))), "http://x".into());
        let err = svc
            .dispatch(&caller(), &payload("a@b.c", &Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
