//! # teamhub-core
//!
//! Domain layer for team membership: entities, value objects, the role
//! authority, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod authority;
pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use authority::{Decision, RoleAuthority};
pub use entities::{EventParticipant, Team, TeamEvent, TeamJoinRequest, TeamMember};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    JoinRequestRepository, MemberRepository, ParticipantRepository, RepoResult,
    TeamEventRepository, TeamRepository,
};
pub use value_objects::{
    AssignableRole, JoinDecision, JoinRequestStatus, ParticipationStatus, Snowflake,
    SnowflakeGenerator, SnowflakeParseError, TeamCapabilities, TeamRole, UnknownVariant,
    Visibility,
};
