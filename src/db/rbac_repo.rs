// src/db/rbac_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rbac::{PlatformRole, UserRole},
};

/// Consulta de papéis de plataforma. Abstraída para o despacho de convites poder ser testado
/// sem banco.
#[async_trait]
pub trait PlatformRoles: Send + Sync {
    async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_role(
        &self,
        user_id: Uuid,
        role: PlatformRole,
    ) -> Result<Option<UserRole>, AppError> {
        // Match exato (usuário + papel)
        let row = sqlx::query_as::<_, UserRole>(
            "SELECT * FROM user_roles WHERE user_id = $1 AND role = $2",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl PlatformRoles for RbacRepository {
    async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.find_role(user_id, PlatformRole::SuperAdmin).await?.is_some())
    }
}
