//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Team not found: {0}")]
    TeamNotFound(Snowflake),

    #[error("Member not found in team")]
    MemberNotFound,

    #[error("Join request not found: {0}")]
    JoinRequestNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Join request does not belong to this team")]
    JoinRequestTeamMismatch,

    // =========================================================================
    // Invalid State Transitions
    // =========================================================================
    #[error("Join request already processed")]
    JoinRequestAlreadyProcessed,

    #[error("A join request for this team is already pending")]
    JoinRequestAlreadyPending,

    #[error("Team is public, join it directly")]
    TeamIsPublic,

    #[error("Already participating in this event")]
    AlreadyParticipating,

    #[error("Event is full")]
    EventFull,

    #[error("Not participating in this event")]
    NotParticipating,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the team owner can change roles")]
    NotTeamOwner,

    #[error("Only the team owner or an admin can do this")]
    NotTeamManager,

    #[error("Not a member of this team")]
    NotTeamMember,

    #[error("Cannot remove the team owner, transfer ownership or delete team instead")]
    CannotRemoveOwner,

    #[error("Cannot change the role of the team owner")]
    CannotModifyOwnerRole,

    #[error("Admins cannot remove other admins")]
    AdminCannotRemoveAdmin,

    #[error("Members can only remove themselves")]
    CannotRemoveMember,

    #[error("Members of this team are not visible")]
    MembersHidden,

    #[error("This team is private, submit a join request instead")]
    JoinRequestRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already a member of this team")]
    AlreadyMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::TeamNotFound(_) => "UNKNOWN_TEAM",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::JoinRequestNotFound(_) => "UNKNOWN_JOIN_REQUEST",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::JoinRequestTeamMismatch => "JOIN_REQUEST_TEAM_MISMATCH",

            // Invalid state
            Self::JoinRequestAlreadyProcessed => "JOIN_REQUEST_ALREADY_PROCESSED",
            Self::JoinRequestAlreadyPending => "JOIN_REQUEST_ALREADY_PENDING",
            Self::TeamIsPublic => "TEAM_IS_PUBLIC",
            Self::AlreadyParticipating => "ALREADY_PARTICIPATING",
            Self::EventFull => "EVENT_FULL",
            Self::NotParticipating => "NOT_PARTICIPATING",

            // Authorization
            Self::NotTeamOwner => "NOT_TEAM_OWNER",
            Self::NotTeamManager => "NOT_TEAM_MANAGER",
            Self::NotTeamMember => "NOT_TEAM_MEMBER",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            Self::CannotModifyOwnerRole => "CANNOT_MODIFY_OWNER_ROLE",
            Self::AdminCannotRemoveAdmin => "ADMIN_CANNOT_REMOVE_ADMIN",
            Self::CannotRemoveMember => "CANNOT_REMOVE_MEMBER",
            Self::MembersHidden => "MEMBERS_HIDDEN",
            Self::JoinRequestRequired => "JOIN_REQUEST_REQUIRED",

            // Conflict
            Self::AlreadyMember => "ALREADY_MEMBER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TeamNotFound(_)
                | Self::MemberNotFound
                | Self::JoinRequestNotFound(_)
                | Self::EventNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::JoinRequestTeamMismatch)
    }

    /// Check if this is a rejected state transition
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::JoinRequestAlreadyProcessed
                | Self::JoinRequestAlreadyPending
                | Self::TeamIsPublic
                | Self::AlreadyParticipating
                | Self::EventFull
                | Self::NotParticipating
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotTeamOwner
                | Self::NotTeamManager
                | Self::NotTeamMember
                | Self::CannotRemoveOwner
                | Self::CannotModifyOwnerRole
                | Self::AdminCannotRemoveAdmin
                | Self::CannotRemoveMember
                | Self::MembersHidden
                | Self::JoinRequestRequired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember)
    }
}
