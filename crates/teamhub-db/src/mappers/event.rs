use teamhub_core::{DomainError, EventParticipant, Snowflake, TeamEvent};

use super::parse_column;
use crate::models::{EventParticipantModel, TeamEventModel};

impl From<TeamEventModel> for TeamEvent {
    fn from(model: TeamEventModel) -> Self {
        TeamEvent {
            id: Snowflake::new(model.id),
            team_id: Snowflake::new(model.team_id),
            title: model.title,
            description: model.description,
            starts_at: model.starts_at,
            max_participants: model.max_participants,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
        }
    }
}

impl TryFrom<EventParticipantModel> for EventParticipant {
    type Error = DomainError;

    fn try_from(model: EventParticipantModel) -> Result<Self, Self::Error> {
        Ok(EventParticipant {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            user_id: Snowflake::new(model.user_id),
            status: parse_column(&model.status)?,
            joined_at: model.joined_at,
            updated_at: model.updated_at,
        })
    }
}
