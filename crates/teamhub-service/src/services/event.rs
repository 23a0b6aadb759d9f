//! Event service
//!
//! Team events and capacity-limited participation.

use teamhub_core::entities::{EventParticipant, TeamEvent, TeamMember};
use teamhub_core::events::{MemberJoinedEvent, ParticipantEvent};
use teamhub_core::{DomainError, DomainEvent, Snowflake, TeamRole};
use tracing::{info, instrument};

use crate::dto::{CreateEventRequest, EventResponse, MessageResponse, ParticipantResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::Notification;
use super::roster::{load_event, Roster};

pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Owner and admins schedule events
    #[instrument(skip(self, request))]
    pub async fn create_event(
        &self,
        team_id: Snowflake,
        actor: Snowflake,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_manage_events(actor)?;

        let event = TeamEvent::new(
            self.ctx.generate_id(),
            team_id,
            request.title,
            request.starts_at,
            actor,
        )
        .with_description(request.description)
        .with_capacity(request.max_participants);

        self.ctx.event_repo().create(&event).await?;

        info!(team_id = %team_id, event_id = %event.id, "Event created");

        Ok(EventResponse::from(&event).with_confirmed_count(0))
    }

    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        team_id: Snowflake,
        actor: Option<Snowflake>,
    ) -> ServiceResult<Vec<EventResponse>> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_view_members(actor)?;

        let events = self.ctx.event_repo().find_by_team(team_id).await?;
        let mut responses = Vec::with_capacity(events.len());
        for event in &events {
            let confirmed = self.ctx.event_repo().confirmed_count(event.id).await?;
            responses.push(EventResponse::from(event).with_confirmed_count(confirmed));
        }
        Ok(responses)
    }

    /// Confirmed participants, oldest first
    #[instrument(skip(self))]
    pub async fn list_participants(
        &self,
        team_id: Snowflake,
        event_id: Snowflake,
        actor: Option<Snowflake>,
    ) -> ServiceResult<Vec<ParticipantResponse>> {
        let roster = Roster::load(self.ctx, team_id).await?;
        roster.authority().can_view_members(actor)?;
        load_event(self.ctx, team_id, event_id).await?;

        let participants = self.ctx.participant_repo().find_confirmed(event_id).await?;
        Ok(participants.iter().map(ParticipantResponse::from).collect())
    }

    /// Join an event.
    ///
    /// Non-members of a public team become members in the same transaction;
    /// on a private team they are refused. Capacity is checked under the
    /// event row lock.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        team_id: Snowflake,
        event_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<ParticipantResponse> {
        let roster = Roster::load(self.ctx, team_id).await?;
        let event = load_event(self.ctx, team_id, event_id).await?;

        let new_member = if roster.authority().is_member(actor) {
            None
        } else if roster.team.is_public() {
            Some(TeamMember::new(self.ctx.generate_id(), team_id, actor, TeamRole::Member))
        } else {
            return Err(DomainError::NotTeamMember.into());
        };

        let participant = EventParticipant::confirmed(self.ctx.generate_id(), event_id, actor);
        let stored = self
            .ctx
            .participant_repo()
            .join(&participant, new_member.as_ref())
            .await?;

        info!(
            team_id = %team_id,
            event_id = %event_id,
            user_id = %actor,
            auto_member = new_member.is_some(),
            "Joined event"
        );

        if let Some(member) = &new_member {
            self.ctx.notifier().dispatch(Notification::new(
                DomainEvent::MemberJoined(MemberJoinedEvent::new(team_id, actor, member.role)),
                roster.manager_ids(),
                Some(actor),
            ));
        }
        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::ParticipantJoined(ParticipantEvent::new(team_id, event_id, actor)),
            [event.created_by],
            Some(actor),
        ));

        Ok(ParticipantResponse::from(&stored))
    }

    #[instrument(skip(self))]
    pub async fn leave(
        &self,
        team_id: Snowflake,
        event_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let event = load_event(self.ctx, team_id, event_id).await?;
        self.ctx.participant_repo().leave(event_id, actor).await?;

        info!(team_id = %team_id, event_id = %event_id, user_id = %actor, "Left event");

        self.ctx.notifier().dispatch(Notification::new(
            DomainEvent::ParticipantLeft(ParticipantEvent::new(team_id, event_id, actor)),
            [event.created_by],
            Some(actor),
        ));

        Ok(MessageResponse::new("Left event"))
    }
}
