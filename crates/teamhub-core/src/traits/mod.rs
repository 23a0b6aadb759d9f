//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{
    JoinRequestRepository, MemberRepository, ParticipantRepository, RepoResult,
    TeamEventRepository, TeamRepository,
};
