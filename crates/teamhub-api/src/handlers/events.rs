//! Team event handlers
//!
//! Event creation, listings and participation.

use axum::{extract::State, Json};
use teamhub_service::dto::{
    CreateEventRequest, EventResponse, MessageResponse, ParticipantResponse,
};
use teamhub_service::EventService;

use crate::extractors::{
    AuthUser, EventPath, OptionalAuthUser, SnowflakePath, TeamPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /teams/{team_id}/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let event = service
        .create_event(path.team_id()?, auth.user_id, request)
        .await?;
    Ok(Created(Json(event)))
}

/// GET /teams/{team_id}/events
pub async fn list_events(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let events = service.list_events(path.team_id()?, auth.user_id()).await?;
    Ok(Json(events))
}

/// GET /teams/{team_id}/events/{event_id}/participants
pub async fn list_participants(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
) -> ApiResult<Json<Vec<ParticipantResponse>>> {
    let service = EventService::new(state.service_context());
    let participants = service
        .list_participants(path.team_id()?, path.event_id()?, auth.user_id())
        .await?;
    Ok(Json(participants))
}

/// Join an event; capacity is enforced atomically
///
/// POST /teams/{team_id}/events/{event_id}/join
pub async fn join_event(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
) -> ApiResult<Json<ParticipantResponse>> {
    let service = EventService::new(state.service_context());
    let participant = service
        .join(path.team_id()?, path.event_id()?, auth.user_id)
        .await?;
    Ok(Json(participant))
}

/// DELETE /teams/{team_id}/events/{event_id}/join
pub async fn leave_event(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .leave(path.team_id()?, path.event_id()?, auth.user_id)
        .await?;
    Ok(Json(response))
}
