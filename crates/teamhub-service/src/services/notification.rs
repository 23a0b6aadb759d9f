//! Fire-and-forget notifications
//!
//! A [`Notification`] pairs a committed [`DomainEvent`] with the users who
//! should hear about it. [`NotificationDispatcher::dispatch`] hands it to a
//! detached task; delivery failures are logged and never reach the caller.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use teamhub_cache::{PubSubEvent, Publisher, RedisPoolError};
use teamhub_core::{DomainEvent, Snowflake};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Notification {
    pub recipients: Vec<Snowflake>,
    pub event: DomainEvent,
}

impl Notification {
    /// Build a notification, dropping `exclude` (usually the actor) and duplicates
    pub fn new(
        event: DomainEvent,
        recipients: impl IntoIterator<Item = Snowflake>,
        exclude: Option<Snowflake>,
    ) -> Self {
        let mut recipients: Vec<Snowflake> = recipients
            .into_iter()
            .filter(|id| Some(*id) != exclude)
            .collect();
        recipients.sort_unstable();
        recipients.dedup();
        Self { recipients, event }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to publish notification: {0}")]
    Transport(#[from] RedisPoolError),
}

/// Delivery backend for notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Publishes to each recipient's `user:{id}` channel
#[async_trait]
impl NotificationSink for Publisher {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        let event = &notification.event;
        let envelope = PubSubEvent::new(event.event_type(), serde_json::to_value(event)?)
            .for_team(event.team_id());
        self.publish_to_users(&notification.recipients, &envelope)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Deliver in the background. Must be called from within a Tokio runtime.
    pub fn dispatch(&self, notification: Notification) {
        if notification.recipients.is_empty() {
            debug!(
                event_type = notification.event.event_type(),
                "Notification has no recipients"
            );
            return;
        }

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.deliver(&notification).await {
                warn!(
                    error = %e,
                    event_type = notification.event.event_type(),
                    team_id = %notification.event.team_id(),
                    "Notification delivery failed"
                );
            }
        });
    }
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;
    use teamhub_core::events::MemberLeftEvent;

    struct ChannelSink(tokio::sync::mpsc::UnboundedSender<Notification>);

    #[async_trait]
    impl NotificationSink for ChannelSink {
        async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
            self.0.send(notification.clone()).ok();
            Ok(())
        }
    }

    struct CountingSink(Mutex<usize>);

    #[async_trait]
    impl NotificationSink for CountingSink {
        async fn deliver(&self, _notification: &Notification) -> Result<(), NotificationError> {
            *self.0.lock() += 1;
            Ok(())
        }
    }

    fn left_event() -> DomainEvent {
        DomainEvent::MemberLeft(MemberLeftEvent::new(Snowflake::new(1), Snowflake::new(2)))
    }

    #[test]
    fn test_recipients_exclude_actor_and_duplicates() {
        let notification = Notification::new(
            left_event(),
            [Snowflake::new(3), Snowflake::new(2), Snowflake::new(3)],
            Some(Snowflake::new(2)),
        );
        assert_eq!(notification.recipients, vec![Snowflake::new(3)]);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_in_background() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let dispatcher = NotificationDispatcher::new(Arc::new(ChannelSink(tx)));

        dispatcher.dispatch(Notification::new(left_event(), [Snowflake::new(9)], None));

        let delivered = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(delivered.recipients, vec![Snowflake::new(9)]);
        assert_eq!(delivered.event.event_type(), "MEMBER_LEFT");
    }

    #[tokio::test]
    async fn test_empty_recipients_skip_sink() {
        let sink = Arc::new(CountingSink(Mutex::new(0)));
        let dispatcher = NotificationDispatcher::new(sink.clone());

        dispatcher.dispatch(Notification::new(left_event(), [Snowflake::new(2)], Some(Snowflake::new(2))));
        tokio::task::yield_now().await;

        assert_eq!(*sink.0.lock(), 0);
    }
}
