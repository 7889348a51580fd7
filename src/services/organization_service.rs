// src/services/organization_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, slug::slug_or_name},
    db::{MembershipRepository, OrganizationRepository},
    models::{
        auth::User,
        membership::{Membership, MembershipRole},
        organization::{
            CreateClientPayload, CreateClientResponse, CreateOrganizationPayload, Organization, Plan,
        },
    },
    services::invite_service::InviteService,
};

#[derive(Clone)]
pub struct OrganizationService {
    organization_repo: OrganizationRepository,
    membership_repo: MembershipRepository,
    invite_service: InviteService,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl OrganizationService {
    pub fn new(
        organization_repo: OrganizationRepository,
        membership_repo: MembershipRepository,
        invite_service: InviteService,
        pool: PgPool,
    ) -> Self {
        Self { organization_repo, membership_repo, invite_service, pool }
    }

    /// Onboarding: cria a igreja e, na mesma transação, vincula o usuário como dono.
    pub async fn create_with_owner(
        &self,
        owner: &User,
        payload: &CreateOrganizationPayload,
    ) -> Result<Organization, AppError> {
        if self.membership_repo.find_for_user(owner.id).await?.is_some() {
            return Err(AppError::Conflict("Este usuário já pertence a uma igreja.".into()));
        }

        let slug = required_slug(payload.slug.as_deref(), &payload.name)?;

        let mut tx = self.pool.begin().await?;

        let organization = self
            .organization_repo
            .create(&mut *tx, payload.name.trim(), &slug, payload.plan_name.as_str())
            .await?;

        self.membership_repo
            .add(&mut *tx, organization.id, owner.id, MembershipRole::Owner)
            .await?;

        tx.commit().await?;

        tracing::info!("⛪ Igreja '{}' criada por {}", organization.slug, owner.id);
        Ok(organization)
    }

    /// Converte o convite pendente mais antigo do e-mail do usuário em vínculo.
    /// Um usuário tem no máximo um vínculo, então os demais convites ficam pendentes.
    pub async fn accept_invite(&self, user: &User) -> Result<Membership, AppError> {
        let email = user
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::BadRequest("O token não contém e-mail.".into()))?;

        if self.membership_repo.find_for_user(user.id).await?.is_some() {
            return Err(AppError::Conflict("Este usuário já pertence a uma igreja.".into()));
        }

        let mut tx = self.pool.begin().await?;

        let pending = self
            .membership_repo
            .list_pending_for_email(&mut *tx, &email)
            .await?;

        let Some(invite) = pending.into_iter().next() else {
            return Err(AppError::NotFound("Nenhum convite pendente para este e-mail.".into()));
        };

        let membership = self
            .membership_repo
            .add(&mut *tx, invite.organization_id, user.id, invite.role)
            .await?;

        self.membership_repo.mark_accepted(&mut *tx, invite.id).await?;

        tx.commit().await?;

        tracing::info!(
            "🤝 Convite aceito: {} entrou na igreja {}",
            user.id,
            invite.organization_id
        );
        Ok(membership)
    }

    /// Console do super-admin: cria o cliente e o convite pendente do responsável juntos.
    /// O e-mail de convite sai depois do commit; se falhar, vira aviso.
    pub async fn create_client(
        &self,
        payload: &CreateClientPayload,
    ) -> Result<CreateClientResponse, AppError> {
        let slug = required_slug(payload.slug.as_deref(), &payload.name)?;
        let owner_email = payload
            .owner_email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        let mut tx = self.pool.begin().await?;

        let organization = self
            .organization_repo
            .create(&mut *tx, payload.name.trim(), &slug, Plan::default().as_str())
            .await?;

        if let Some(email) = &owner_email {
            self.membership_repo
                .create_pending(&mut *tx, organization.id, email, MembershipRole::Owner)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("⛪ Cliente '{}' criado pelo console", organization.slug);

        let mut warnings = Vec::new();
        if let Some(email) = &owner_email {
            if let Err(e) = self.invite_service.send_invite(email, organization.id).await {
                tracing::warn!("Convite para {} não enviado: {}", email, e);
                warnings.push(format!("Igreja criada, mas o convite não foi enviado: {}", e));
            }
        }

        Ok(CreateClientResponse { organization, warnings })
    }

    pub async fn delete_organization(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.organization_repo.delete(&self.pool, id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("Nenhuma organização foi removida.".into()));
        }

        tracing::info!("🗑️ Igreja {} removida", id);
        Ok(())
    }
}

fn required_slug(slug: Option<&str>, name: &str) -> Result<String, AppError> {
    let slug = slug_or_name(slug, name);
    if slug.is_empty() {
        return Err(AppError::BadRequest("Slug inválido: use letras ou números.".into()));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        models::membership::InviteStatus,
        services::{identity::IdentityProvider, invite_service::test_support::*},
    };

    fn service(pool: &PgPool, provider: Option<Arc<RecordingProvider>>) -> OrganizationService {
        let invite_service = InviteService::new(
            provider.map(|p| p as Arc<dyn IdentityProvider>),
            Arc::new(FixedRoles(Ok(true))),
            "https://www.tapchurch.com.br".into(),
        );
        OrganizationService::new(
            OrganizationRepository::new(pool.clone()),
            MembershipRepository::new(pool.clone()),
            invite_service,
            pool.clone(),
        )
    }

    fn user(email: Option<&str>) -> User {
        User { id: Uuid::new_v4(), email: email.map(str::to_string) }
    }

    fn onboarding(name: &str, slug: Option<&str>) -> CreateOrganizationPayload {
        CreateOrganizationPayload {
            name: name.into(),
            slug: slug.map(str::to_string),
            plan_name: Plan::default(),
        }
    }

    fn client(name: &str, owner_email: Option<&str>) -> CreateClientPayload {
        CreateClientPayload {
            name: name.into(),
            slug: None,
            owner_email: owner_email.map(str::to_string),
        }
    }

    async fn invite_status(pool: &PgPool, organization_id: Uuid) -> InviteStatus {
        sqlx::query_scalar("SELECT status FROM pending_memberships WHERE organization_id = $1")
            .bind(organization_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn slug_comes_from_name_when_missing() {
        assert_eq!(required_slug(None, "Igreja da Graça").unwrap(), "igreja-da-graca");
        assert_eq!(required_slug(Some("  "), "Sede Norte").unwrap(), "sede-norte");
        assert_eq!(required_slug(Some("Graça"), "Outro nome").unwrap(), "graca");
    }

    #[test]
    fn slug_without_letters_or_digits_is_rejected() {
        assert!(matches!(required_slug(None, "!!!"), Err(AppError::BadRequest(_))));
    }

    #[sqlx::test]
    async fn onboarding_creates_the_owner_membership(pool: PgPool) {
        let svc = service(&pool, None);
        let owner = user(Some("pastor@graca.org"));

        let org = svc.create_with_owner(&owner, &onboarding("Igreja da Graça", None)).await.unwrap();
        assert_eq!(org.slug, "igreja-da-graca");

        let membership = svc.membership_repo.find_for_user(owner.id).await.unwrap().unwrap();
        assert_eq!(membership.organization_id, org.id);
        assert_eq!(membership.role, MembershipRole::Owner);

        // Segundo onboarding do mesmo usuário
        let err = svc
            .create_with_owner(&owner, &onboarding("Outra", Some("outra")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test]
    async fn duplicate_organization_slug_is_a_conflict(pool: PgPool) {
        let svc = service(&pool, None);
        svc.create_with_owner(&user(None), &onboarding("Graça", Some("graca"))).await.unwrap();

        let err = svc
            .create_with_owner(&user(None), &onboarding("Outra Graça", Some("Graça")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test]
    async fn accepting_converts_the_oldest_pending_invite(pool: PgPool) {
        let svc = service(&pool, None);
        let graca = svc.organization_repo.create(&pool, "Graça", "graca", "starter").await.unwrap();
        let siao = svc.organization_repo.create(&pool, "Sião", "siao", "starter").await.unwrap();

        for (org, role, age) in [(graca.id, "admin", "2 days"), (siao.id, "owner", "1 hour")] {
            sqlx::query(
                "INSERT INTO pending_memberships (organization_id, email, role, created_at) \
                 VALUES ($1, 'pastor@graca.org', $2::membership_role, NOW() - $3::interval)",
            )
            .bind(org)
            .bind(role)
            .bind(age)
            .execute(&pool)
            .await
            .unwrap();
        }

        let pastor = user(Some("  Pastor@Graca.org "));
        let membership = svc.accept_invite(&pastor).await.unwrap();
        assert_eq!(membership.organization_id, graca.id);
        assert_eq!(membership.role, MembershipRole::Admin);
        assert_eq!(invite_status(&pool, graca.id).await, InviteStatus::Accepted);
        assert_eq!(invite_status(&pool, siao.id).await, InviteStatus::Pending);

        let err = svc.accept_invite(&pastor).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test]
    async fn accepting_without_invite_or_email_fails(pool: PgPool) {
        let svc = service(&pool, None);

        let err = svc.accept_invite(&user(Some("ninguem@graca.org"))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = svc.accept_invite(&user(None)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[sqlx::test]
    async fn failed_invite_email_becomes_a_warning(pool: PgPool) {
        let provider = Arc::new(RecordingProvider {
            reject_with: Some("Email rate limit exceeded".into()),
            ..Default::default()
        });
        let svc = service(&pool, Some(provider));

        let created = svc
            .create_client(&client("Igreja da Graça", Some("Pastor@Graca.org")))
            .await
            .unwrap();

        assert_eq!(created.warnings.len(), 1);
        assert!(created.warnings[0].contains("Email rate limit exceeded"));
        // Igreja e convite pendente ficam gravados
        assert!(svc.organization_repo.find_by_id(created.organization.id).await.unwrap().is_some());
        assert_eq!(invite_status(&pool, created.organization.id).await, InviteStatus::Pending);
    }

    #[sqlx::test]
    async fn delivered_invite_has_no_warnings(pool: PgPool) {
        let provider = Arc::new(RecordingProvider::default());
        let svc = service(&pool, Some(provider.clone()));

        let created = svc
            .create_client(&client("Igreja Sião", Some("lider@siao.org")))
            .await
            .unwrap();

        assert!(created.warnings.is_empty());
        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].organization_id, created.organization.id);
    }

    #[sqlx::test]
    async fn deleting_nothing_is_an_error(pool: PgPool) {
        let svc = service(&pool, None);

        let err = svc.delete_organization(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let org = svc.organization_repo.create(&pool, "Graça", "graca", "starter").await.unwrap();
        svc.delete_organization(org.id).await.unwrap();
        assert!(svc.organization_repo.find_by_id(org.id).await.unwrap().is_none());
    }
}
