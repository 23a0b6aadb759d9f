//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a call.
//! Authorization always goes through `RoleAuthority` over a freshly loaded
//! roster; the repositories then apply the change atomically.

pub mod context;
pub mod error;
pub mod event;
pub mod join_request;
pub mod member;
pub mod notification;
mod roster;
pub mod team;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use join_request::JoinRequestService;
pub use member::MemberService;
pub use notification::{Notification, NotificationDispatcher, NotificationError, NotificationSink};
pub use team::TeamService;
