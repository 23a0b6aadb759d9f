//! Database models - SQLx-compatible structs for PostgreSQL tables

mod event;
mod join_request;
mod member;
mod team;

pub use event::{EventParticipantModel, TeamEventModel};
pub use join_request::TeamJoinRequestModel;
pub use member::TeamMemberModel;
pub use team::TeamModel;
