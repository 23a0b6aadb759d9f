//! Team handlers

use axum::{extract::State, Json};
use teamhub_service::dto::{CreateTeamRequest, TeamResponse};
use teamhub_service::TeamService;

use crate::extractors::{AuthUser, OptionalAuthUser, SnowflakePath, TeamPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a team owned by the caller
///
/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> ApiResult<Created<Json<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    let team = service.create_team(auth.user_id, request).await?;
    Ok(Created(Json(team)))
}

/// Teams the caller belongs to
///
/// GET /teams/@me
pub async fn list_my_teams(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    let teams = service.list_my_teams(auth.user_id).await?;
    Ok(Json(teams))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<TeamPath>,
) -> ApiResult<Json<TeamResponse>> {
    let service = TeamService::new(state.service_context());
    let team = service.get_team(path.team_id()?, auth.user_id()).await?;
    Ok(Json(team))
}
