//! Domain events - emitted after a membership change has been committed.
//!
//! They are the payload of user notifications published over Redis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{JoinRequestStatus, Snowflake, TeamRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Membership
    // =========================================================================
    MemberJoined(MemberJoinedEvent),
    MemberLeft(MemberLeftEvent),
    MemberRemoved(MemberRemovedEvent),
    MemberRoleChanged(MemberRoleChangedEvent),

    // =========================================================================
    // Join requests
    // =========================================================================
    JoinRequestCreated(JoinRequestCreatedEvent),
    JoinRequestResolved(JoinRequestResolvedEvent),

    // =========================================================================
    // Event participation
    // =========================================================================
    ParticipantJoined(ParticipantEvent),
    ParticipantLeft(ParticipantEvent),
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MemberJoined(_) => "MEMBER_JOINED",
            Self::MemberLeft(_) => "MEMBER_LEFT",
            Self::MemberRemoved(_) => "MEMBER_REMOVED",
            Self::MemberRoleChanged(_) => "MEMBER_ROLE_CHANGED",
            Self::JoinRequestCreated(_) => "JOIN_REQUEST_CREATED",
            Self::JoinRequestResolved(_) => "JOIN_REQUEST_RESOLVED",
            Self::ParticipantJoined(_) => "PARTICIPANT_JOINED",
            Self::ParticipantLeft(_) => "PARTICIPANT_LEFT",
        }
    }

    pub fn team_id(&self) -> Snowflake {
        match self {
            Self::MemberJoined(e) => e.team_id,
            Self::MemberLeft(e) => e.team_id,
            Self::MemberRemoved(e) => e.team_id,
            Self::MemberRoleChanged(e) => e.team_id,
            Self::JoinRequestCreated(e) => e.team_id,
            Self::JoinRequestResolved(e) => e.team_id,
            Self::ParticipantJoined(e) | Self::ParticipantLeft(e) => e.team_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MemberJoined(e) => e.timestamp,
            Self::MemberLeft(e) => e.timestamp,
            Self::MemberRemoved(e) => e.timestamp,
            Self::MemberRoleChanged(e) => e.timestamp,
            Self::JoinRequestCreated(e) => e.timestamp,
            Self::JoinRequestResolved(e) => e.timestamp,
            Self::ParticipantJoined(e) | Self::ParticipantLeft(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberJoinedEvent {
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub role: TeamRole,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLeftEvent {
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRemovedEvent {
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub removed_by: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRoleChangedEvent {
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub old_role: TeamRole,
    pub new_role: TeamRole,
    pub changed_by: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequestCreatedEvent {
    pub team_id: Snowflake,
    pub request_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequestResolvedEvent {
    pub team_id: Snowflake,
    pub request_id: Snowflake,
    pub user_id: Snowflake,
    pub status: JoinRequestStatus,
    pub processed_by: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEvent {
    pub team_id: Snowflake,
    pub event_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

impl MemberJoinedEvent {
    pub fn new(team_id: Snowflake, user_id: Snowflake, role: TeamRole) -> Self {
        Self {
            team_id,
            user_id,
            role,
            timestamp: Utc::now(),
        }
    }
}

impl MemberLeftEvent {
    pub fn new(team_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            team_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberRemovedEvent {
    pub fn new(team_id: Snowflake, user_id: Snowflake, removed_by: Snowflake) -> Self {
        Self {
            team_id,
            user_id,
            removed_by,
            timestamp: Utc::now(),
        }
    }
}

impl MemberRoleChangedEvent {
    pub fn new(
        team_id: Snowflake,
        user_id: Snowflake,
        old_role: TeamRole,
        new_role: TeamRole,
        changed_by: Snowflake,
    ) -> Self {
        Self {
            team_id,
            user_id,
            old_role,
            new_role,
            changed_by,
            timestamp: Utc::now(),
        }
    }
}

impl JoinRequestCreatedEvent {
    pub fn new(team_id: Snowflake, request_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            team_id,
            request_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

impl JoinRequestResolvedEvent {
    pub fn new(
        team_id: Snowflake,
        request_id: Snowflake,
        user_id: Snowflake,
        status: JoinRequestStatus,
        processed_by: Snowflake,
    ) -> Self {
        Self {
            team_id,
            request_id,
            user_id,
            status,
            processed_by,
            timestamp: Utc::now(),
        }
    }
}

impl ParticipantEvent {
    pub fn new(team_id: Snowflake, event_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            team_id,
            event_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::JoinRequestResolved(JoinRequestResolvedEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            JoinRequestStatus::Approved,
            Snowflake::new(4),
        ));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "JOIN_REQUEST_RESOLVED");
        assert_eq!(json["status"], "approved");
        assert_eq!(json["team_id"], "1");

        let parsed: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.event_type(), "JOIN_REQUEST_RESOLVED");
        assert_eq!(parsed.team_id(), Snowflake::new(1));
    }

    #[test]
    fn test_participant_events_share_payload() {
        let payload = ParticipantEvent::new(Snowflake::new(1), Snowflake::new(5), Snowflake::new(9));
        let joined = DomainEvent::ParticipantJoined(payload.clone());
        let left = DomainEvent::ParticipantLeft(payload);
        assert_eq!(joined.event_type(), "PARTICIPANT_JOINED");
        assert_eq!(left.event_type(), "PARTICIPANT_LEFT");
        assert_eq!(joined.team_id(), left.team_id());
    }
}
