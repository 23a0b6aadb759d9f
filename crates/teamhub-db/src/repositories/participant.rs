//! PostgreSQL implementation of ParticipantRepository
//!
//! Joins serialize on the event row (`SELECT ... FOR UPDATE`) so the
//! capacity check and the insert see the same participant count.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use teamhub_core::entities::{EventParticipant, TeamEvent, TeamMember};
use teamhub_core::error::DomainError;
use teamhub_core::traits::{ParticipantRepository, RepoResult};
use teamhub_core::value_objects::{ParticipationStatus, Snowflake};

use crate::mappers::map_all;
use crate::models::{EventParticipantModel, TeamEventModel};

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[instrument(skip(self))]
    async fn find_confirmed(&self, event_id: Snowflake) -> RepoResult<Vec<EventParticipant>> {
        let results = sqlx::query_as::<_, EventParticipantModel>(
            r#"
            SELECT id, event_id, user_id, status, joined_at, updated_at
            FROM event_participants
            WHERE event_id = $1 AND status = 'confirmed'
            ORDER BY joined_at, id
            "#,
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_all(results)
    }

    #[instrument(
        skip(self, participant, new_member),
        fields(event_id = %participant.event_id, user_id = %participant.user_id)
    )]
    async fn join(
        &self,
        participant: &EventParticipant,
        new_member: Option<&TeamMember>,
    ) -> RepoResult<EventParticipant> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let event: TeamEvent = sqlx::query_as::<_, TeamEventModel>(
            r#"
            SELECT id, team_id, title, description, starts_at, max_participants, created_by, created_at
            FROM team_events
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(participant.event_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(TeamEvent::from)
        .ok_or(DomainError::EventNotFound(participant.event_id))?;

        let confirmed = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM event_participants
            WHERE event_id = $1 AND status = 'confirmed'
            "#,
        )
        .bind(participant.event_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT status FROM event_participants
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(participant.event_id.into_inner())
        .bind(participant.user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|raw| raw.parse::<ParticipationStatus>())
        .transpose()
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        event.admit(confirmed, existing)?;

        if let Some(member) = new_member {
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
        }

        let stored = sqlx::query_as::<_, EventParticipantModel>(
            r#"
            INSERT INTO event_participants (id, event_id, user_id, status, joined_at, updated_at)
            VALUES ($1, $2, $3, 'confirmed', $4, $4)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET status = 'confirmed', updated_at = NOW()
            RETURNING id, event_id, user_id, status, joined_at, updated_at
            "#,
        )
        .bind(participant.id.into_inner())
        .bind(participant.event_id.into_inner())
        .bind(participant.user_id.into_inner())
        .bind(participant.joined_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        EventParticipant::try_from(stored)
    }

    #[instrument(skip(self))]
    async fn leave(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<EventParticipant> {
        let result = sqlx::query_as::<_, EventParticipantModel>(
            r#"
            UPDATE event_participants
            SET status = 'cancelled', updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2 AND status = 'confirmed'
            RETURNING id, event_id, user_id, status, joined_at, updated_at
            "#,
        )
        .bind(event_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .ok_or(DomainError::NotParticipating)
            .and_then(EventParticipant::try_from)
    }
}
