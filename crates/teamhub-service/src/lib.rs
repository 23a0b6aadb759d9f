//! # teamhub-service
//!
//! Application layer: membership workflows on top of the role authority,
//! request/response DTOs, and fire-and-forget notification dispatch.

pub mod dto;
pub mod services;

pub use services::{
    EventService, JoinRequestService, MemberService, Notification, NotificationDispatcher,
    NotificationError, NotificationSink, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TeamService,
};
