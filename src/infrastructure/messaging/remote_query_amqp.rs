use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use lapin::message::Delivery;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicRejectOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel};
use serde_json::Value;

use super::connection::AmqpConnectionManager;
use crate::application::ports::remote_query_port::{RemoteCallError, RemoteQueryPort};
use crate::application::services::rpc::{ReplyDelivery, RpcChannel, exchange};

/// Request/reply client over RabbitMQ's default exchange.
///
/// Every call runs on its own channel with an exclusive, auto-deleted,
/// server-named reply queue.
pub struct AmqpRemoteQuery {
    connections: Arc<AmqpConnectionManager>,
}

impl AmqpRemoteQuery {
    pub fn new(connections: Arc<AmqpConnectionManager>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RemoteQueryPort for AmqpRemoteQuery {
    async fn call(
        &self,
        topic: &str,
        payload: &Value,
        expected_field: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, RemoteCallError> {
        let open = async { self.connections.open_channel().await.map(AmqpRpcChannel) };
        exchange(open, topic, payload, expected_field, timeout).await
    }
}

struct AmqpRpcChannel(Channel);

#[async_trait]
impl RpcChannel for AmqpRpcChannel {
    type Reply = AmqpReply;

    async fn declare_reply_queue(&self) -> anyhow::Result<String> {
        let queue = self
            .0
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .context("amqp_declare_reply_queue")?;
        Ok(queue.name().as_str().to_string())
    }

    async fn consume(
        &self,
        queue: &str,
        consumer_tag: &str,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<AmqpReply>>> {
        let consumer = self
            .0
            .basic_consume(
                queue,
                consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .context("amqp_consume_reply_queue")?;
        Ok(consumer
            .map(|next| next.map(AmqpReply).context("amqp_reply_delivery"))
            .boxed())
    }

    async fn publish(
        &self,
        routing_key: &str,
        body: &[u8],
        reply_to: &str,
        correlation_id: &str,
    ) -> anyhow::Result<()> {
        let properties = BasicProperties::default()
            .with_content_type("application/json".into())
            .with_reply_to(reply_to.into())
            .with_correlation_id(correlation_id.into());
        self.0
            .basic_publish(
                "",
                routing_key,
                BasicPublishOptions::default(),
                body,
                properties,
            )
            .await
            .context("amqp_publish_request")?;
        Ok(())
    }

    async fn close(&self) {
        if let Err(err) = self.0.close(200, "OK").await {
            tracing::debug!(error = ?err, "rpc_channel_close_failed");
        }
    }
}

struct AmqpReply(Delivery);

#[async_trait]
impl ReplyDelivery for AmqpReply {
    fn correlation_id(&self) -> Option<&str> {
        self.0.properties.correlation_id().as_ref().map(|id| id.as_str())
    }

    fn body(&self) -> &[u8] {
        &self.0.data
    }

    async fn accept(&self) -> anyhow::Result<()> {
        self.0
            .acker
            .ack(BasicAckOptions::default())
            .await
            .context("amqp_ack_reply")
    }

    async fn discard(&self) -> anyhow::Result<()> {
        self.0
            .acker
            .reject(BasicRejectOptions { requeue: false })
            .await
            .context("amqp_reject_reply")
    }
}
