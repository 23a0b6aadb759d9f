//! PostgreSQL repository implementations

mod error;
mod event;
mod join_request;
mod member;
mod participant;
mod team;

pub use error::{map_db_error, map_unique_violation};
pub use event::PgTeamEventRepository;
pub use join_request::PgJoinRequestRepository;
pub use member::PgMemberRepository;
pub use participant::PgParticipantRepository;
pub use team::PgTeamRepository;
