//! Entity to DTO mappers

use teamhub_core::entities::{EventParticipant, Team, TeamEvent, TeamJoinRequest, TeamMember};

use super::responses::{
    EventResponse, JoinRequestResponse, MemberResponse, ParticipantResponse, TeamResponse,
};

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.clone(),
            description: team.description.clone(),
            owner_id: team.owner_id.to_string(),
            visibility: team.visibility,
            created_at: team.created_at,
            updated_at: team.updated_at,
            member_count: None,
        }
    }
}

impl From<&TeamMember> for MemberResponse {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id.to_string(),
            team_id: member.team_id.to_string(),
            user_id: member.user_id.to_string(),
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

impl From<&TeamJoinRequest> for JoinRequestResponse {
    fn from(request: &TeamJoinRequest) -> Self {
        Self {
            id: request.id.to_string(),
            team_id: request.team_id.to_string(),
            user_id: request.user_id.to_string(),
            message: request.message.clone(),
            status: request.status,
            created_at: request.created_at,
            processed_at: request.processed_at,
            processed_by: request.processed_by.map(|id| id.to_string()),
        }
    }
}

impl From<&TeamEvent> for EventResponse {
    fn from(event: &TeamEvent) -> Self {
        Self {
            id: event.id.to_string(),
            team_id: event.team_id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            starts_at: event.starts_at,
            max_participants: event.max_participants,
            created_by: event.created_by.to_string(),
            created_at: event.created_at,
            confirmed_count: None,
        }
    }
}

impl From<&EventParticipant> for ParticipantResponse {
    fn from(participant: &EventParticipant) -> Self {
        Self {
            id: participant.id.to_string(),
            event_id: participant.event_id.to_string(),
            user_id: participant.user_id.to_string(),
            status: participant.status,
            joined_at: participant.joined_at,
            updated_at: participant.updated_at,
        }
    }
}
