//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod role;
mod snowflake;
mod status;

pub use capabilities::TeamCapabilities;
pub use role::{AssignableRole, TeamRole, UnknownVariant, Visibility};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use status::{JoinDecision, JoinRequestStatus, ParticipationStatus};
