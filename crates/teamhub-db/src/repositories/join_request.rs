//! PostgreSQL implementation of JoinRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use teamhub_core::entities::{TeamJoinRequest, TeamMember};
use teamhub_core::error::DomainError;
use teamhub_core::traits::{JoinRequestRepository, RepoResult};
use teamhub_core::value_objects::{JoinRequestStatus, Snowflake};

use crate::mappers::map_all;
use crate::models::TeamJoinRequestModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgJoinRequestRepository {
    pool: PgPool,
}

impl PgJoinRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Conditional transition out of `pending`. Matches nothing once processed.
const RESOLVE_SQL: &str = r#"
    UPDATE team_join_requests
    SET status = $2, processed_by = $3, processed_at = NOW()
    WHERE id = $1 AND status = 'pending'
    RETURNING id, team_id, user_id, message, status, created_at, processed_at, processed_by
"#;

#[async_trait]
impl JoinRequestRepository for PgJoinRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamJoinRequest>> {
        let result = sqlx::query_as::<_, TeamJoinRequestModel>(
            r#"
            SELECT id, team_id, user_id, message, status, created_at, processed_at, processed_by
            FROM team_join_requests
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TeamJoinRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamJoinRequest>> {
        let results = sqlx::query_as::<_, TeamJoinRequestModel>(
            r#"
            SELECT id, team_id, user_id, message, status, created_at, processed_at, processed_by
            FROM team_join_requests
            WHERE team_id = $1 AND status = 'pending'
            ORDER BY created_at, id
            "#,
        )
        .bind(team_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_all(results)
    }

    #[instrument(skip(self, request), fields(team_id = %request.team_id, user_id = %request.user_id))]
    async fn create(&self, request: &TeamJoinRequest) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team_join_requests (id, team_id, user_id, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(request.id.into_inner())
        .bind(request.team_id.into_inner())
        .bind(request.user_id.into_inner())
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::JoinRequestAlreadyPending))?;

        Ok(())
    }

    #[instrument(skip(self, member))]
    async fn approve(
        &self,
        request_id: Snowflake,
        processed_by: Snowflake,
        member: &TeamMember,
    ) -> RepoResult<TeamJoinRequest> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let updated = sqlx::query_as::<_, TeamJoinRequestModel>(RESOLVE_SQL)
            .bind(request_id.into_inner())
            .bind(JoinRequestStatus::Approved.as_str())
            .bind(processed_by.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or(DomainError::JoinRequestAlreadyProcessed)?;

        // Dropping `tx` on the error path rolls the status change back
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
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        TeamJoinRequest::try_from(updated)
    }

    #[instrument(skip(self))]
    async fn reject(&self, request_id: Snowflake, processed_by: Snowflake) -> RepoResult<TeamJoinRequest> {
        let result = sqlx::query_as::<_, TeamJoinRequestModel>(RESOLVE_SQL)
            .bind(request_id.into_inner())
            .bind(JoinRequestStatus::Rejected.as_str())
            .bind(processed_by.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result
            .ok_or(DomainError::JoinRequestAlreadyProcessed)
            .and_then(TeamJoinRequest::try_from)
    }
}
