//! Team service
//!
//! Team creation and the read paths gated by team visibility.

use teamhub_core::entities::{Team, TeamMember};
use teamhub_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CreateTeamRequest, TeamResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::roster::Roster;

pub struct TeamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TeamService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a team; the actor becomes its owner
    #[instrument(skip(self, request))]
    pub async fn create_team(
        &self,
        actor: Snowflake,
        request: CreateTeamRequest,
    ) -> ServiceResult<TeamResponse> {
        let team = Team::new(self.ctx.generate_id(), request.name, actor, request.visibility)
            .with_description(request.description);
        let owner = TeamMember::owner(self.ctx.generate_id(), team.id, actor);

        self.ctx.team_repo().create(&team, &owner).await?;

        info!(team_id = %team.id, owner_id = %actor, visibility = %team.visibility, "Team created");

        Ok(TeamResponse::from(&team).with_member_count(1))
    }

    /// Public teams are visible to anyone, private teams only to members
    #[instrument(skip(self))]
    pub async fn get_team(
        &self,
        team_id: Snowflake,
        actor: Option<Snowflake>,
    ) -> ServiceResult<TeamResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_view_members(actor)?;

        let count = i64::try_from(roster.members.len()).unwrap_or(i64::MAX);
        Ok(TeamResponse::from(&roster.team).with_member_count(count))
    }

    #[instrument(skip(self))]
    pub async fn list_my_teams(&self, actor: Snowflake) -> ServiceResult<Vec<TeamResponse>> {
        let teams = self.ctx.team_repo().find_by_user(actor).await?;

        let mut responses = Vec::with_capacity(teams.len());
        for team in &teams {
            let count = self.ctx.team_repo().member_count(team.id).await?;
            responses.push(TeamResponse::from(team).with_member_count(count));
        }
        Ok(responses)
    }
}
