//! Team + member snapshot loaded before every authority decision

use teamhub_core::entities::{Team, TeamEvent, TeamMember};
use teamhub_core::{DomainError, RoleAuthority, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub(crate) struct Roster {
    pub team: Team,
    pub members: Vec<TeamMember>,
}

impl Roster {
    pub async fn load(ctx: &ServiceContext, team_id: Snowflake) -> ServiceResult<Self> {
        let team = load_team(ctx, team_id).await?;
        let members = ctx.member_repo().find_by_team(team_id).await?;
        Ok(Self { team, members })
    }

    pub fn authority(&self) -> RoleAuthority<'_> {
        RoleAuthority::new(&self.team, &self.members)
    }

    /// Owner and admins, the audience for team-management notifications
    pub fn manager_ids(&self) -> impl Iterator<Item = Snowflake> + '_ {
        self.members
            .iter()
            .filter(|m| m.role.is_manager())
            .map(|m| m.user_id)
    }
}

pub(crate) async fn load_team(ctx: &ServiceContext, team_id: Snowflake) -> ServiceResult<Team> {
    Ok(ctx
        .team_repo()
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound(team_id))?)
}

/// An event of another team is reported as missing
pub(crate) async fn load_event(
    ctx: &ServiceContext,
    team_id: Snowflake,
    event_id: Snowflake,
) -> ServiceResult<TeamEvent> {
    Ok(ctx
        .event_repo()
        .find_by_id(event_id)
        .await?
        .filter(|event| event.team_id == team_id)
        .ok_or(DomainError::EventNotFound(event_id))?)
}
