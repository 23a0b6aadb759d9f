//! Data transfer objects for API requests and responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateEventRequest, CreateJoinRequestRequest, CreateTeamRequest, ResolveJoinRequestRequest,
    UpdateMemberRoleRequest,
};

pub use responses::{
    ApiResponse, EventResponse, HealthChecks, HealthResponse, JoinRequestDecisionResponse,
    JoinRequestResponse, MemberResponse, MessageResponse, ParticipantResponse, ReadinessResponse,
    TeamResponse,
};
