//! # teamhub-cache
//!
//! Redis connection pool and the pub/sub publisher used to deliver team
//! notifications to whoever is subscribed (web sockets, push workers).
//!
//! ```ignore
//! use teamhub_cache::{PubSubEvent, Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//! let event = PubSubEvent::new("MEMBER_JOINED", data);
//! publisher.publish_to_users(&[user_id], &event).await?;
//! ```

pub mod pool;
pub mod pubsub;

pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher, TEAM_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};
