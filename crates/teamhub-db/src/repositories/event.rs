//! PostgreSQL implementation of TeamEventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use teamhub_core::entities::TeamEvent;
use teamhub_core::traits::{RepoResult, TeamEventRepository};
use teamhub_core::value_objects::Snowflake;

use crate::models::TeamEventModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgTeamEventRepository {
    pool: PgPool,
}

impl PgTeamEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamEventRepository for PgTeamEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamEvent>> {
        let result = sqlx::query_as::<_, TeamEventModel>(
            r#"
            SELECT id, team_id, title, description, starts_at, max_participants, created_by, created_at
            FROM team_events
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TeamEvent::from))
    }

    #[instrument(skip(self))]
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamEvent>> {
        let results = sqlx::query_as::<_, TeamEventModel>(
            r#"
            SELECT id, team_id, title, description, starts_at, max_participants, created_by, created_at
            FROM team_events
            WHERE team_id = $1
            ORDER BY starts_at, id
            "#,
        )
        .bind(team_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TeamEvent::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id, team_id = %event.team_id))]
    async fn create(&self, event: &TeamEvent) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team_events (id, team_id, title, description, starts_at, max_participants, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.id.into_inner())
        .bind(event.team_id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.starts_at)
        .bind(event.max_participants)
        .bind(event.created_by.into_inner())
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn confirmed_count(&self, event_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM event_participants
            WHERE event_id = $1 AND status = 'confirmed'
            "#,
        )
        .bind(event_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
