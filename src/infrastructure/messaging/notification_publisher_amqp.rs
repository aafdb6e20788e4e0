use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lapin::BasicProperties;
use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::ExchangeKind;

use super::connection::AmqpConnectionManager;
use crate::application::ports::notification_event_publisher::{
    NotificationCreatedEvent, NotificationEventPublisher,
};

pub const NOTIFICATIONS_EXCHANGE: &str = "notifications_exchange";
pub const NOTIFICATION_ROUTING_KEY: &str = "customers.notification";

const PERSISTENT: u8 = 2;

pub struct AmqpNotificationPublisher {
    connections: Arc<AmqpConnectionManager>,
    timeout: Duration,
}

impl AmqpNotificationPublisher {
    pub fn new(connections: Arc<AmqpConnectionManager>, timeout: Duration) -> Self {
        Self {
            connections,
            timeout,
        }
    }
}

#[async_trait]
impl NotificationEventPublisher for AmqpNotificationPublisher {
    async fn publish(&self, event: &NotificationCreatedEvent) -> anyhow::Result<()> {
        let body = serde_json::to_vec(event).context("notification_event_serialize")?;
        let channel = self.connections.open_channel().await?;

        let published = async {
            channel
                .exchange_declare(
                    NOTIFICATIONS_EXCHANGE,
                    ExchangeKind::Topic,
                    ExchangeDeclareOptions {
                        durable: true,
                        ..ExchangeDeclareOptions::default()
                    },
                    FieldTable::default(),
                )
                .await
                .context("amqp_declare_notifications_exchange")?;
            channel
                .basic_publish(
                    NOTIFICATIONS_EXCHANGE,
                    NOTIFICATION_ROUTING_KEY,
                    BasicPublishOptions::default(),
                    &body,
                    BasicProperties::default()
                        .with_content_type("application/json".into())
                        .with_delivery_mode(PERSISTENT),
                )
                .await
                .context("amqp_publish_notification")?;
            anyhow::Ok(())
        };
        let published = tokio::time::timeout(self.timeout, published)
            .await
            .unwrap_or_else(|_| {
                Err(anyhow::anyhow!(
                    "notification publish timed out after {:?}",
                    self.timeout
                ))
            });

        if let Err(err) = channel.close(200, "OK").await {
            tracing::debug!(error = ?err, "notification_channel_close_failed");
        }
        published
    }
}
