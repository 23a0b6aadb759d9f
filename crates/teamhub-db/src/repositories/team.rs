//! PostgreSQL implementation of TeamRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use teamhub_core::entities::{Team, TeamMember};
use teamhub_core::error::DomainError;
use teamhub_core::traits::{RepoResult, TeamRepository};
use teamhub_core::value_objects::Snowflake;

use crate::mappers::map_all;
use crate::models::TeamModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Team>> {
        let result = sqlx::query_as::<_, TeamModel>(
            r#"
            SELECT id, name, description, owner_id, visibility, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Team::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Team>> {
        let results = sqlx::query_as::<_, TeamModel>(
            r#"
            SELECT t.id, t.name, t.description, t.owner_id, t.visibility, t.created_at, t.updated_at
            FROM teams t
            INNER JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_all(results)
    }

    #[instrument(skip(self, team, owner), fields(team_id = %team.id))]
    async fn create(&self, team: &Team, owner: &TeamMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, name, description, owner_id, visibility, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(team.id.into_inner())
        .bind(&team.name)
        .bind(&team.description)
        .bind(team.owner_id.into_inner())
        .bind(team.visibility.as_str())
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO team_members (id, team_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(owner.id.into_inner())
        .bind(owner.team_id.into_inner())
        .bind(owner.user_id.into_inner())
        .bind(owner.role.as_str())
        .bind(owner.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, team_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM team_members WHERE team_id = $1
            "#,
        )
        .bind(team_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTeamRepository>();
    }
}
