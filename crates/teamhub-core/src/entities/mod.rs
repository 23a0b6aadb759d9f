//! Domain entities - core business objects

mod event;
mod join_request;
mod member;
mod team;

pub use event::{EventParticipant, TeamEvent};
pub use join_request::TeamJoinRequest;
pub use member::TeamMember;
pub use team::Team;
