//! Permission decisions over a team and its member list

mod role_authority;

pub use role_authority::{Decision, RoleAuthority};
