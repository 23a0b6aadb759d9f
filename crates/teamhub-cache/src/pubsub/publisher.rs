//! Redis Pub/Sub publisher.

use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use teamhub_core::Snowflake;

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Envelope for every published message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "MEMBER_JOINED")
    pub event_type: String,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Snowflake>,
}

impl PubSubEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            team_id: None,
        }
    }

    #[must_use]
    pub fn for_team(mut self, team_id: Snowflake) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish the same event to several channels over one connection
    pub async fn publish_many(
        &self,
        channels: &[PubSubChannel],
        event: &PubSubEvent,
    ) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut conn = self.pool.get().await?;
        let mut total_receivers = 0;

        for channel in channels {
            let receivers: u32 = conn.publish(channel.name(), &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            channels = channels.len(),
            event_type = %event.event_type,
            total_receivers = total_receivers,
            "Published event to multiple channels"
        );

        Ok(total_receivers)
    }

    /// Publish to each user's personal channel
    pub async fn publish_to_users(&self, user_ids: &[Snowflake], event: &PubSubEvent) -> RedisResult<u32> {
        let channels: Vec<PubSubChannel> = user_ids.iter().copied().map(PubSubChannel::user).collect();
        self.publish_many(&channels, event).await
    }
}
