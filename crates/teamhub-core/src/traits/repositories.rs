//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that must be atomic (team
//! creation with its owner, approval with member creation, event admission)
//! are single trait methods so an implementation can wrap them in one
//! transaction.

use async_trait::async_trait;

use crate::entities::{EventParticipant, Team, TeamEvent, TeamJoinRequest, TeamMember};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TeamRole};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Team Repository
// ============================================================================

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Team>>;

    /// Teams the user is a member of, oldest membership first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Team>>;

    /// Insert the team and its owner member in one transaction
    async fn create(&self, team: &Team, owner: &TeamMember) -> RepoResult<()>;

    async fn member_count(&self, team_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members of a team ordered by `joined_at`
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamMember>>;

    /// Fails with `AlreadyMember` if the (team, user) pair exists
    async fn create(&self, member: &TeamMember) -> RepoResult<()>;

    /// Change a non-owner member's role; owner rows are never matched
    async fn update_role(
        &self,
        team_id: Snowflake,
        user_id: Snowflake,
        role: TeamRole,
    ) -> RepoResult<TeamMember>;

    /// Delete a non-owner member; owner rows are never matched
    async fn delete(&self, team_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Join Request Repository
// ============================================================================

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamJoinRequest>>;

    /// Pending requests for a team, oldest first
    async fn find_pending_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamJoinRequest>>;

    /// Fails with `JoinRequestAlreadyPending` if the user already has one
    async fn create(&self, request: &TeamJoinRequest) -> RepoResult<()>;

    /// Mark the request approved and insert `member`, atomically.
    ///
    /// Fails with `JoinRequestAlreadyProcessed` if the request is no longer
    /// pending, or `AlreadyMember` if the membership exists. Neither write is
    /// persisted on failure.
    async fn approve(
        &self,
        request_id: Snowflake,
        processed_by: Snowflake,
        member: &TeamMember,
    ) -> RepoResult<TeamJoinRequest>;

    /// Mark the request rejected if it is still pending
    async fn reject(&self, request_id: Snowflake, processed_by: Snowflake) -> RepoResult<TeamJoinRequest>;
}

// ============================================================================
// Team Event Repository
// ============================================================================

#[async_trait]
pub trait TeamEventRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeamEvent>>;

    /// Events of a team ordered by `starts_at`
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<TeamEvent>>;

    async fn create(&self, event: &TeamEvent) -> RepoResult<()>;

    async fn confirmed_count(&self, event_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Participant Repository
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Confirmed participants ordered by `joined_at`
    async fn find_confirmed(&self, event_id: Snowflake) -> RepoResult<Vec<EventParticipant>>;

    /// Admit `participant` to its event.
    ///
    /// Holds the event row locked while it counts confirmed participants,
    /// applies [`TeamEvent::admit`], and upserts on (event_id, user_id) with
    /// status confirmed. When `new_member` is given it is inserted in the same
    /// transaction. Returns the stored participation row.
    async fn join(
        &self,
        participant: &EventParticipant,
        new_member: Option<&TeamMember>,
    ) -> RepoResult<EventParticipant>;

    /// Flip a confirmed participation to cancelled.
    ///
    /// Fails with `NotParticipating` if there is no confirmed row.
    async fn leave(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<EventParticipant>;
}
