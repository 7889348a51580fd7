// src/services/policy.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::PlatformRoles, models::membership::MembershipRole};

/// O que um membro pode fazer dentro da própria organização.
/// Substitui as policies de linha do banco: é avaliado no servidor antes de toda mutação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReadOrganization,
    ManageLinks,
    ManageTags,
    ManageLocations,
    ManageBranding,
    ManageTeam,
}

impl Capability {
    pub fn slug(&self) -> &'static str {
        match self {
            Capability::ReadOrganization => "organization:read",
            Capability::ManageLinks => "links:write",
            Capability::ManageTags => "tags:write",
            Capability::ManageLocations => "locations:write",
            Capability::ManageBranding => "branding:write",
            Capability::ManageTeam => "team:write",
        }
    }
}

impl MembershipRole {
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            MembershipRole::Owner | MembershipRole::Admin => true,
            MembershipRole::Editor => matches!(
                capability,
                Capability::ReadOrganization | Capability::ManageLinks | Capability::ManageTags
            ),
        }
    }

    /// Teto de papel na equipe: só o dono concede, altera ou remove o papel de dono.
    pub fn can_manage_member(&self, member_role: MembershipRole) -> bool {
        member_role != MembershipRole::Owner || *self == MembershipRole::Owner
    }
}

/// Troca de papel: o chamador precisa poder mexer no papel atual e no novo.
pub fn check_role_change(
    caller: MembershipRole,
    current: Option<MembershipRole>,
    requested: MembershipRole,
) -> Result<(), AppError> {
    let allowed = caller.allows(Capability::ManageTeam)
        && current.is_none_or(|role| caller.can_manage_member(role))
        && caller.can_manage_member(requested);

    if !allowed {
        return Err(AppError::Forbidden(
            "Somente o dono pode conceder ou alterar o papel de dono.".into(),
        ));
    }
    Ok(())
}

/// Checagem de super-admin por match exato em `user_roles`.
/// Fail-closed: erro na consulta conta como "não é super-admin".
pub async fn is_super_admin(roles: &dyn PlatformRoles, user_id: Uuid) -> bool {
    roles.is_super_admin(user_id).await.unwrap_or_else(|e| {
        tracing::warn!("Falha ao consultar papéis do usuário {}: {}", user_id, e);
        false
    })
}
