// src/db/membership_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::membership::{Membership, MembershipRole, PendingMembership},
};

// Vínculos usuário <-> igreja e convites pendentes
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// O vínculo (único) do usuário, se existir.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Option<Membership>, AppError> {
        let membership = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    pub async fn find(&self, organization_id: Uuid, id: Uuid) -> Result<Option<Membership>, AppError> {
        let membership = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Membership>, AppError> {
        let members = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE organization_id = $1 ORDER BY created_at ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn add<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
    ) -> Result<Membership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (organization_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Este usuário já pertence a uma igreja."))
    }

    pub async fn update_role<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        role: MembershipRole,
    ) -> Result<Option<Membership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships SET role = $3
            WHERE id = $1 AND organization_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(role)
        .fetch_optional(executor)
        .await?;

        Ok(membership)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // ---
    // Convites pendentes
    // ---

    /// Registra (ou reabre) o convite de um e-mail para a organização.
    pub async fn create_pending<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        email: &str,
        role: MembershipRole,
    ) -> Result<PendingMembership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pending = sqlx::query_as::<_, PendingMembership>(
            r#"
            INSERT INTO pending_memberships (organization_id, email, role)
            VALUES ($1, lower($2), $3)
            ON CONFLICT (organization_id, email)
            DO UPDATE SET role = EXCLUDED.role, status = 'pending', updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(email)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(pending)
    }

    pub async fn list_pending_for_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Vec<PendingMembership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pending = sqlx::query_as::<_, PendingMembership>(
            r#"
            SELECT * FROM pending_memberships
            WHERE email = lower($1) AND status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .bind(email)
        .fetch_all(executor)
        .await?;

        Ok(pending)
    }

    pub async fn mark_accepted<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE pending_memberships SET status = 'accepted', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::OrganizationRepository;

    #[sqlx::test]
    async fn team_mutations_stay_inside_the_organization(pool: PgPool) {
        let orgs = OrganizationRepository::new(pool.clone());
        let graca = orgs.create(&pool, "Igreja da Graça", "graca", "starter").await.unwrap();
        let siao = orgs.create(&pool, "Igreja Sião", "siao", "starter").await.unwrap();

        let repo = MembershipRepository::new(pool.clone());
        let editor = repo
            .add(&pool, graca.id, Uuid::new_v4(), MembershipRole::Editor)
            .await
            .unwrap();

        assert!(repo.find(siao.id, editor.id).await.unwrap().is_none());
        assert!(repo
            .update_role(&pool, siao.id, editor.id, MembershipRole::Owner)
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.delete(&pool, siao.id, editor.id).await.unwrap(), 0);

        let promoted = repo
            .update_role(&pool, graca.id, editor.id, MembershipRole::Admin)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(promoted.role, MembershipRole::Admin);
    }

    #[sqlx::test]
    async fn a_user_belongs_to_a_single_organization(pool: PgPool) {
        let orgs = OrganizationRepository::new(pool.clone());
        let graca = orgs.create(&pool, "Igreja da Graça", "graca", "starter").await.unwrap();
        let siao = orgs.create(&pool, "Igreja Sião", "siao", "starter").await.unwrap();

        let repo = MembershipRepository::new(pool.clone());
        let user_id = Uuid::new_v4();
        repo.add(&pool, graca.id, user_id, MembershipRole::Owner).await.unwrap();

        let err = repo.add(&pool, siao.id, user_id, MembershipRole::Editor).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.find_for_user(user_id).await.unwrap().unwrap().organization_id, graca.id);
    }
}
