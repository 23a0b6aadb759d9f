//! Join request entity - a user's application to join a private team

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{JoinDecision, JoinRequestStatus, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamJoinRequest {
    pub id: Snowflake,
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<Snowflake>,
}

impl TeamJoinRequest {
    pub fn new(
        id: Snowflake,
        team_id: Snowflake,
        user_id: Snowflake,
        message: Option<String>,
    ) -> Self {
        Self {
            id,
            team_id,
            user_id,
            message,
            status: JoinRequestStatus::Pending,
            created_at: Utc::now(),
            processed_at: None,
            processed_by: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Guards applied before any decision is taken: the request must belong
    /// to `team_id` and still be pending.
    pub fn ensure_resolvable(&self, team_id: Snowflake) -> Result<(), DomainError> {
        if self.team_id != team_id {
            return Err(DomainError::JoinRequestTeamMismatch);
        }
        if !self.is_pending() {
            return Err(DomainError::JoinRequestAlreadyProcessed);
        }
        Ok(())
    }

    /// Move to a terminal state, recording who decided and when.
    pub fn resolve(&mut self, decision: JoinDecision, processed_by: Snowflake) -> Result<(), DomainError> {
        self.status = self.status.resolve(decision)?;
        self.processed_by = Some(processed_by);
        self.processed_at = Some(Utc::now());
        Ok(())
    }
}
