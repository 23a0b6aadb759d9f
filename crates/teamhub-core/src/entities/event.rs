//! Team events and their participants

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ParticipationStatus, Snowflake};

/// A scheduled activity scoped to a team.
///
/// `max_participants` of `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEvent {
    pub id: Snowflake,
    pub team_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl TeamEvent {
    pub fn new(
        id: Snowflake,
        team_id: Snowflake,
        title: String,
        starts_at: DateTime<Utc>,
        created_by: Snowflake,
    ) -> Self {
        Self {
            id,
            team_id,
            title,
            description: None,
            starts_at,
            max_participants: None,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn with_capacity(mut self, max_participants: Option<i32>) -> Self {
        self.max_participants = max_participants;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[inline]
    pub fn is_full(&self, confirmed: i64) -> bool {
        self.max_participants
            .is_some_and(|max| confirmed >= i64::from(max))
    }

    /// Admission rule for a join.
    ///
    /// `confirmed` is the current number of confirmed participants and
    /// `existing` the caller's current participation row, if any. Callers
    /// must evaluate this under the same lock as the write that follows.
    pub fn admit(
        &self,
        confirmed: i64,
        existing: Option<ParticipationStatus>,
    ) -> Result<(), DomainError> {
        if existing.is_some_and(ParticipationStatus::is_confirmed) {
            return Err(DomainError::AlreadyParticipating);
        }
        if self.is_full(confirmed) {
            return Err(DomainError::EventFull);
        }
        Ok(())
    }
}

/// A user's participation record, unique per (event, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParticipant {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub user_id: Snowflake,
    pub status: ParticipationStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventParticipant {
    pub fn confirmed(id: Snowflake, event_id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            event_id,
            user_id,
            status: ParticipationStatus::Confirmed,
            joined_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(max: Option<i32>) -> TeamEvent {
        TeamEvent::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "Saturday ride".to_string(),
            Utc::now(),
            Snowflake::new(10),
        )
        .with_capacity(max)
    }

    #[test]
    fn test_unlimited_event_never_full() {
        let event = event(None);
        assert!(!event.is_full(10_000));
        assert!(event.admit(10_000, None).is_ok());
    }

    #[test]
    fn test_full_event_rejects_new_participant() {
        let event = event(Some(2));
        assert!(event.admit(1, None).is_ok());
        assert!(matches!(event.admit(2, None), Err(DomainError::EventFull)));
    }

    #[test]
    fn test_cancelled_participant_can_rejoin_when_space() {
        let event = event(Some(2));
        assert!(event.admit(1, Some(ParticipationStatus::Cancelled)).is_ok());
        assert!(matches!(
            event.admit(2, Some(ParticipationStatus::Cancelled)),
            Err(DomainError::EventFull)
        ));
    }

    #[test]
    fn test_confirmed_participant_is_rejected_first() {
        let event = event(Some(2));
        assert!(matches!(
            event.admit(2, Some(ParticipationStatus::Confirmed)),
            Err(DomainError::AlreadyParticipating)
        ));
    }

    #[test]
    fn test_participant_starts_confirmed() {
        let p = EventParticipant::confirmed(Snowflake::new(5), Snowflake::new(1), Snowflake::new(7));
        assert!(p.is_confirmed());
    }
}
