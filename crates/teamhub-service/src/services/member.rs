//! Member service
//!
//! Joining public teams, role changes, removal and the member listing.

use teamhub_core::entities::TeamMember;
use teamhub_core::events::{
    MemberJoinedEvent, MemberLeftEvent, MemberRemovedEvent, MemberRoleChangedEvent,
};
use teamhub_core::{DomainError, DomainEvent, Snowflake, TeamRole};
use tracing::{info, instrument};

use crate::dto::{MemberResponse, MessageResponse, UpdateMemberRoleRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::Notification;
use super::roster::Roster;

pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a public team directly. Private teams need a join request.
    #[instrument(skip(self))]
    pub async fn join_public_team(
        &self,
        team_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        if !roster.team.is_public() {
            return Err(DomainError::JoinRequestRequired.into());
        }

        let member = TeamMember::new(self.ctx.generate_id(), team_id, actor, TeamRole::Member);
        self.ctx.member_repo().create(&member).await?;

        info!(team_id = %team_id, user_id = %actor, "Member joined team");

        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::MemberJoined(MemberJoinedEvent::new(team_id, actor, member.role)),
            roster.manager_ids(),
            Some(actor),
        ));

        Ok(MemberResponse::from(&member))
    }

    /// Owner-only role change between admin and member
    #[instrument(skip(self, request))]
    pub async fn update_member_role(
        &self,
        team_id: Snowflake,
        target: Snowflake,
        actor: Snowflake,
        request: UpdateMemberRoleRequest,
    ) -> ServiceResult<MemberResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        let authority = roster.authority();
        authority.check_role_change(actor, target)?;

        let current = authority.member(target).ok_or(DomainError::MemberNotFound)?;
        let new_role = TeamRole::from(request.role);
        if current.role == new_role {
            return Ok(MemberResponse::from(current));
        }

        let updated = self
            .ctx
            .member_repo()
            .update_role(team_id, target, new_role)
            .await?;

        info!(
            team_id = %team_id,
            user_id = %target,
            old_role = %current.role,
            new_role = %new_role,
            "Member role changed"
        );

        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::MemberRoleChanged(MemberRoleChangedEvent::new(
                team_id,
                target,
                current.role,
                new_role,
                actor,
            )),
            [target],
            Some(actor),
        ));

        Ok(MemberResponse::from(&updated))
    }

    /// Remove `target`, or leave the team when `target == actor`
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        team_id: Snowflake,
        target: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_remove_member(actor, target)?;

        self.ctx.member_repo().delete(team_id, target).await?;

        if target == actor {
            info!(team_id = %team_id, user_id = %actor, "Member left team");
            self.ctx.notifier().dispatch(Notification::new(
                DomainEvent::MemberLeft(MemberLeftEvent::new(team_id, actor)),
                roster.manager_ids(),
                Some(actor),
            ));
            return Ok(MessageResponse::new("Left team"));
        }

        info!(team_id = %team_id, user_id = %target, removed_by = %actor, "Member removed");
        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::MemberRemoved(MemberRemovedEvent::new(team_id, target, actor)),
            [target],
            None,
        ));

        Ok(MessageResponse::new("Member removed"))
    }

    /// Members ordered by join time
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        team_id: Snowflake,
        actor: Option<Snowflake>,
    ) -> ServiceResult<Vec<MemberResponse>> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_view_members(actor)?;

        Ok(roster.members.iter().map(MemberResponse::from).collect())
    }
}
