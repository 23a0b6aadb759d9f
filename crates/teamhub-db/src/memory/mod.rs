//! In-memory repositories
//!
//! One [`MemoryStore`] implements every repository trait over a single
//! mutex-guarded state, so multi-row operations (approve, event join) are
//! atomic the same way the PostgreSQL transactions are. Used by service
//! and API tests, and for running the server without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use teamhub_core::entities::{EventParticipant, Team, TeamEvent, TeamJoinRequest, TeamMember};
use teamhub_core::error::DomainError;
use teamhub_core::traits::{
    JoinRequestRepository, MemberRepository, ParticipantRepository, RepoResult, TeamEventRepository,
    TeamRepository,
};
use teamhub_core::value_objects::{
    JoinDecision, ParticipationStatus, Snowflake, TeamRole,
};

#[derive(Debug, Default)]
struct State {
    teams: HashMap<Snowflake, Team>,
    members: Vec<TeamMember>,
    join_requests: HashMap<Snowflake, TeamJoinRequest>,
    events: HashMap<Snowflake, TeamEvent>,
    participants: Vec<EventParticipant>,
}

impl State {
    fn member_index(&self, team_id: Snowflake, user_id: Snowflake) -> Option<usize> {
        self.members
            .iter()
            .position(|m| m.team_id == team_id && m.user_id == user_id)
    }

    fn insert_member(&mut self, member: &TeamMember) -> RepoResult<()> {
        if self.member_index(member.team_id, member.user_id).is_some() {
            return Err(DomainError::AlreadyMember);
        }
        self.members.push(member.clone());
        Ok(())
    }

    fn participant_index(&self, event_id: Snowflake, user_id: Snowflake) -> Option<usize> {
        self.participants
            .iter()
            .position(|p| p.event_id == event_id && p.user_id == user_id)
    }

    fn confirmed_count(&self, event_id: Snowflake) -> i64 {
        let count = self
            .participants
            .iter()
            .filter(|p| p.event_id == event_id && p.is_confirmed())
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn pending_request_mut(&mut self, request_id: Snowflake) -> RepoResult<&mut TeamJoinRequest> {
        match self.join_requests.get_mut(&request_id) {
            Some(request) if request.is_pending() => Ok(request),
            Some(_) => Err(DomainError::JoinRequestAlreadyProcessed),
            None => Err(DomainError::JoinRequestNotFound(request_id)),
        }
    }
}

/// Shared in-memory backing store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_join(mut members: Vec<TeamMember>) -> Vec<TeamMember> {
    members.sort_by_key(|m| (m.joined_at, m.id));
    members
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Team>> {
        Ok(self.state.lock().teams.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Team>> {
        let state = self.state.lock();
        let memberships = sorted_by_join(
            state
                .members
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect(),
        );
        Ok(memberships
            .iter()
            .filter_map(|m| state.teams.get(&m.team_id).cloned())
            .collect())
    }

    async fn create(&self, team: &Team, owner: &TeamMember) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.teams.contains_key(&team.id) {
            return Err(DomainError::InternalError(format!("duplicate team id {}", team.id)));
        }
        state.insert_member(owner)?;
        state.teams.insert(team.id, team.clone());
        Ok(())
    }

    async fn member_count(&self, team_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        let count = state.members.iter().filter(|m| m.team_id == team_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamMember>> {
        let state = self.state.lock();
        Ok(sorted_by_join(
            state
                .members
                .iter()
                .filter(|m| m.team_id == team_id)
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, member: &TeamMember) -> RepoResult<()> {
        self.state.lock().insert_member(member)
    }

    async fn update_role(
        &self,
        team_id: Snowflake,
        user_id: Snowflake,
        role: TeamRole,
    ) -> RepoResult<TeamMember> {
        let mut state = self.state.lock();
        let index = state
            .member_index(team_id, user_id)
            .filter(|&i| !state.members[i].is_owner())
            .ok_or(DomainError::MemberNotFound)?;
        state.members[index].role = role;
        Ok(state.members[index].clone())
    }

    async fn delete(&self, team_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let index = state
            .member_index(team_id, user_id)
            .filter(|&i| !state.members[i].is_owner())
            .ok_or(DomainError::MemberNotFound)?;
        state.members.remove(index);

        let now = Utc::now();
        let State {
            events,
            participants,
            ..
        } = &mut *state;
        for row in participants.iter_mut().filter(|p| {
            p.user_id == user_id
                && p.is_confirmed()
                && events.get(&p.event_id).is_some_and(|e| e.team_id == team_id)
        }) {
            row.status = ParticipationStatus::Cancelled;
            row.updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl JoinRequestRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamJoinRequest>> {
        Ok(self.state.lock().join_requests.get(&id).cloned())
    }

    async fn find_pending_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamJoinRequest>> {
        let state = self.state.lock();
        let mut pending: Vec<_> = state
            .join_requests
            .values()
            .filter(|r| r.team_id == team_id && r.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|r| (r.created_at, r.id));
        Ok(pending)
    }

    async fn create(&self, request: &TeamJoinRequest) -> RepoResult<()> {
        let mut state = self.state.lock();
        let duplicate = state
            .join_requests
            .values()
            .any(|r| r.team_id == request.team_id && r.user_id == request.user_id && r.is_pending());
        if duplicate {
            return Err(DomainError::JoinRequestAlreadyPending);
        }
        state.join_requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn approve(
        &self,
        request_id: Snowflake,
        processed_by: Snowflake,
        member: &TeamMember,
    ) -> RepoResult<TeamJoinRequest> {
        let mut state = self.state.lock();
        state.pending_request_mut(request_id)?;
        state.insert_member(member)?;

        let request = state.pending_request_mut(request_id)?;
        request.resolve(JoinDecision::Approve, processed_by)?;
        Ok(request.clone())
    }

    async fn reject(&self, request_id: Snowflake, processed_by: Snowflake) -> RepoResult<TeamJoinRequest> {
        let mut state = self.state.lock();
        let request = state.pending_request_mut(request_id)?;
        request.resolve(JoinDecision::Reject, processed_by)?;
        Ok(request.clone())
    }
}

#[async_trait]
impl TeamEventRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamEvent>> {
        Ok(self.state.lock().events.get(&id).cloned())
    }

    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamEvent>> {
        let state = self.state.lock();
        let mut events: Vec<_> = state
            .events
            .values()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.starts_at, e.id));
        Ok(events)
    }

    async fn create(&self, event: &TeamEvent) -> RepoResult<()> {
        self.state.lock().events.insert(event.id, event.clone());
        Ok(())
    }

    async fn confirmed_count(&self, event_id: Snowflake) -> RepoResult<i64> {
        Ok(self.state.lock().confirmed_count(event_id))
    }
}

#[async_trait]
impl ParticipantRepository for MemoryStore {
    async fn find_confirmed(&self, event_id: Snowflake) -> RepoResult<Vec<EventParticipant>> {
        let state = self.state.lock();
        let mut confirmed: Vec<_> = state
            .participants
            .iter()
            .filter(|p| p.event_id == event_id && p.is_confirmed())
            .cloned()
            .collect();
        confirmed.sort_by_key(|p| (p.joined_at, p.id));
        Ok(confirmed)
    }

    async fn join(
        &self,
        participant: &EventParticipant,
        new_member: Option<&TeamMember>,
    ) -> RepoResult<EventParticipant> {
        let mut state = self.state.lock();
        let event_id = participant.event_id;

        let event = state
            .events
            .get(&event_id)
            .cloned()
            .ok_or(DomainError::EventNotFound(event_id))?;
        let existing = state.participant_index(event_id, participant.user_id);
        let existing_status = existing.map(|i| state.participants[i].status);

        event.admit(state.confirmed_count(event_id), existing_status)?;

        if let Some(member) = new_member {
            state.insert_member(member)?;
        }

        let stored = match existing {
            Some(i) => {
                let row = &mut state.participants[i];
                row.status = ParticipationStatus::Confirmed;
                row.updated_at = Utc::now();
                row.clone()
            }
            None => {
                state.participants.push(participant.clone());
                participant.clone()
            }
        };
        Ok(stored)
    }

    async fn leave(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<EventParticipant> {
        let mut state = self.state.lock();
        let index = state
            .participant_index(event_id, user_id)
            .filter(|&i| state.participants[i].is_confirmed())
            .ok_or(DomainError::NotParticipating)?;

        let row = &mut state.participants[index];
        row.status = ParticipationStatus::Cancelled;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}
