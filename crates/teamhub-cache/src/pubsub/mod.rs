//! Redis Pub/Sub publishing

mod channels;
mod publisher;

pub use channels::{PubSubChannel, TEAM_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
