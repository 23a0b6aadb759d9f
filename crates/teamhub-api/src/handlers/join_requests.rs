//! Join request handlers

use axum::{extract::State, Json};
use teamhub_service::dto::{
    CreateJoinRequestRequest, JoinRequestDecisionResponse, JoinRequestResponse,
    ResolveJoinRequestRequest,
};
use teamhub_service::JoinRequestService;

use crate::extractors::{AuthUser, JoinRequestPath, SnowflakePath, TeamPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Ask to join a private team
///
/// POST /teams/{team_id}/join-requests
pub async fn create_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
    ValidatedJson(request): ValidatedJson<CreateJoinRequestRequest>,
) -> ApiResult<Created<Json<JoinRequestResponse>>> {
    let service = JoinRequestService::new(state.service_context());
    let created = service
        .create(path.team_id()?, auth.user_id, request)
        .await?;
    Ok(Created(Json(created)))
}

/// Pending requests, visible to owner and admins
///
/// GET /teams/{team_id}/join-requests
pub async fn list_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Json<Vec<JoinRequestResponse>>> {
    let service = JoinRequestService::new(state.service_context());
    let pending = service.list_pending(path.team_id()?, auth.user_id).await?;
    Ok(Json(pending))
}

/// Approve or reject a pending request
///
/// PATCH /teams/{team_id}/join-requests/{request_id}
pub async fn resolve_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<JoinRequestPath>,
    ValidatedJson(request): ValidatedJson<ResolveJoinRequestRequest>,
) -> ApiResult<Json<JoinRequestDecisionResponse>> {
    let service = JoinRequestService::new(state.service_context());
    let decision = service
        .resolve(path.team_id()?, path.request_id()?, auth.user_id, request)
        .await?;
    Ok(Json(decision))
}
