//! Domain events

mod domain_event;

pub use domain_event::{
    DomainEvent, JoinRequestCreatedEvent, JoinRequestResolvedEvent, MemberJoinedEvent,
    MemberLeftEvent, MemberRemovedEvent, MemberRoleChangedEvent, ParticipantEvent,
};
