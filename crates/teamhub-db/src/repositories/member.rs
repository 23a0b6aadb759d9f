//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use teamhub_core::entities::TeamMember;
use teamhub_core::error::DomainError;
use teamhub_core::traits::{MemberRepository, RepoResult};
use teamhub_core::value_objects::{Snowflake, TeamRole};

use crate::mappers::map_all;
use crate::models::TeamMemberModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamMember>> {
        let results = sqlx::query_as::<_, TeamMemberModel>(
            r#"
            SELECT id, team_id, user_id, role, joined_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY joined_at, id
            "#,
        )
        .bind(team_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_all(results)
    }

    #[instrument(skip(self, member), fields(team_id = %member.team_id, user_id = %member.user_id))]
    async fn create(&self, member: &TeamMember) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team_members (id, team_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id.into_inner())
        .bind(member.team_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        team_id: Snowflake,
        user_id: Snowflake,
        role: TeamRole,
    ) -> RepoResult<TeamMember> {
        // The owner row is excluded here as well as in the authority check
        let result = sqlx::query_as::<_, TeamMemberModel>(
            r#"
            UPDATE team_members
            SET role = $3
            WHERE team_id = $1 AND user_id = $2 AND role <> 'owner'
            RETURNING id, team_id, user_id, role, joined_at
            "#,
        )
        .bind(team_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .ok_or(DomainError::MemberNotFound)
            .and_then(TeamMember::try_from)
    }

    #[instrument(skip(self))]
    async fn delete(&self, team_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM team_members
            WHERE team_id = $1 AND user_id = $2 AND role <> 'owner'
            "#,
        )
        .bind(team_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        // A former member holds no seats in the team's events
        sqlx::query(
            r#"
            UPDATE event_participants
            SET status = 'cancelled', updated_at = NOW()
            WHERE user_id = $2
              AND status = 'confirmed'
              AND event_id IN (SELECT id FROM team_events WHERE team_id = $1)
            "#,
        )
        .bind(team_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
