//! Join request service
//!
//! `pending -> approved | rejected`. Approval creates the membership in the
//! same transaction as the status change.

use teamhub_core::entities::{TeamJoinRequest, TeamMember};
use teamhub_core::events::{JoinRequestCreatedEvent, JoinRequestResolvedEvent};
use teamhub_core::{DomainError, DomainEvent, JoinDecision, Snowflake, TeamRole};
use tracing::{info, instrument};

use crate::dto::{
    CreateJoinRequestRequest, JoinRequestDecisionResponse, JoinRequestResponse,
    ResolveJoinRequestRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::Notification;
use super::roster::Roster;

pub struct JoinRequestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> JoinRequestService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply to join a private team
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        team_id: Snowflake,
        actor: Snowflake,
        request: CreateJoinRequestRequest,
    ) -> ServiceResult<JoinRequestResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        if roster.team.is_public() {
            return Err(DomainError::TeamIsPublic.into());
        }
        if roster.authority().is_member(actor) {
            return Err(DomainError::AlreadyMember.into());
        }

        let message = request.message.filter(|m| !m.trim().is_empty());
        let join_request = TeamJoinRequest::new(self.ctx.generate_id(), team_id, actor, message);
        self.ctx.join_request_repo().create(&join_request).await?;

        info!(team_id = %team_id, user_id = %actor, request_id = %join_request.id, "Join request created");

        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::JoinRequestCreated(JoinRequestCreatedEvent::new(
                team_id,
                join_request.id,
                actor,
            )),
            roster.manager_ids(),
            Some(actor),
        ));

        Ok(JoinRequestResponse::from(&join_request))
    }

    /// Pending requests, owner and admins only
    #[instrument(skip(self))]
    pub async fn list_pending(
        &self,
        team_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<Vec<JoinRequestResponse>> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_approve_join_request(actor)?;

        let pending = self.ctx.join_request_repo().find_pending_by_team(team_id).await?;
        Ok(pending.iter().map(JoinRequestResponse::from).collect())
    }

    /// Approve or reject a pending request.
    ///
    /// Guards run in order: request exists, belongs to `team_id`, is still
    /// pending, and the actor may approve. The write itself is conditional on
    /// the request still being pending, so a concurrent decision loses with
    /// `JoinRequestAlreadyProcessed`.
    #[instrument(skip(self, request))]
    pub async fn resolve(
        &self,
        team_id: Snowflake,
        request_id: Snowflake,
        actor: Snowflake,
        request: ResolveJoinRequestRequest,
    ) -> ServiceResult<JoinRequestDecisionResponse> {
        let join_request = self
            .ctx
            .join_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::JoinRequestNotFound(request_id))?;
        join_request.ensure_resolvable(team_id)?;

        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_approve_join_request(actor)?;

        let resolved = match request.action {
            JoinDecision::Approve => {
                let member = TeamMember::new(
                    self.ctx.generate_id(),
                    team_id,
                    join_request.user_id,
                    TeamRole::Member,
                );
                self.ctx
                    .join_request_repo()
                    .approve(request_id, actor, &member)
                    .await?
            }
            JoinDecision::Reject => self.ctx.join_request_repo().reject(request_id, actor).await?,
        };

        info!(
            team_id = %team_id,
            request_id = %request_id,
            user_id = %resolved.user_id,
            status = %resolved.status,
            processed_by = %actor,
            "Join request resolved"
        );

        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::JoinRequestResolved(JoinRequestResolvedEvent::new(
                team_id,
                request_id,
                resolved.user_id,
                resolved.status,
                actor,
            )),
            [resolved.user_id],
            None,
        ));

        Ok(JoinRequestDecisionResponse::new(resolved.status))
    }
}
