//! Member handlers
//!
//! Listing, joining, role changes and removal.

use axum::{extract::State, Json};
use teamhub_service::dto::{MemberResponse, MessageResponse, UpdateMemberRoleRequest};
use teamhub_service::MemberService;

use crate::extractors::{
    AuthUser, OptionalAuthUser, SnowflakePath, TeamMemberPath, TeamPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Members of a team ordered by join time
///
/// GET /teams/{team_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let members = service.list_members(path.team_id()?, auth.user_id()).await?;
    Ok(Json(members))
}

/// Join a public team
///
/// POST /teams/{team_id}/members/@me
pub async fn join_team(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let member = service.join_public_team(path.team_id()?, auth.user_id).await?;
    Ok(Created(Json(member)))
}

/// Leave a team
///
/// DELETE /teams/{team_id}/members/@me
pub async fn leave_team(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service
        .remove_member(path.team_id()?, auth.user_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Change a member's role (owner only)
///
/// PATCH /teams/{team_id}/members/{user_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamMemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let member = service
        .update_member_role(path.team_id()?, path.user_id()?, auth.user_id, request)
        .await?;
    Ok(Json(member))
}

/// Remove a member
///
/// DELETE /teams/{team_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<TeamMemberPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service
        .remove_member(path.team_id()?, path.user_id()?, auth.user_id)
        .await?;
    Ok(Json(response))
}
