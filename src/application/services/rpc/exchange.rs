use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde_json::Value;
use tokio::time::{Instant, timeout_at};

use super::pending::{PendingRequest, ReplyDelivery};
use crate::application::ports::remote_query_port::RemoteCallError;

/// The broker operations one request/reply call needs.
#[async_trait]
pub trait RpcChannel: Send + Sync {
    type Reply: ReplyDelivery + 'static;

    /// Declares an exclusive, auto-deleted reply queue and returns its name.
    async fn declare_reply_queue(&self) -> anyhow::Result<String>;
    async fn consume(
        &self,
        queue: &str,
        consumer_tag: &str,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<Self::Reply>>>;
    async fn publish(
        &self,
        routing_key: &str,
        body: &[u8],
        reply_to: &str,
        correlation_id: &str,
    ) -> anyhow::Result<()>;
    async fn close(&self);
}

/// Runs one call: open a channel, declare the reply queue, start consuming,
/// publish, then wait for the matching reply.
///
/// Everything up to the publish shares one setup deadline of `timeout`; an
/// unreachable broker surfaces as `BrokerUnavailable` instead of hanging.
/// Once a channel exists it is closed whatever the outcome.
pub async fn exchange<C, F>(
    open: F,
    topic: &str,
    payload: &Value,
    expected_field: Option<&str>,
    timeout: Duration,
) -> Result<Value, RemoteCallError>
where
    C: RpcChannel,
    F: Future<Output = anyhow::Result<C>> + Send,
{
    let setup_deadline = Instant::now() + timeout;
    let channel = match timeout_at(setup_deadline, open).await {
        Ok(opened) => opened.map_err(RemoteCallError::BrokerUnavailable)?,
        Err(_) => return Err(setup_timed_out(topic, "opening a channel", timeout)),
    };

    let outcome = round_trip(
        &channel,
        topic,
        payload,
        expected_field,
        timeout,
        setup_deadline,
    )
    .await;

    channel.close().await;
    outcome
}

async fn round_trip<C: RpcChannel>(
    channel: &C,
    topic: &str,
    payload: &Value,
    expected_field: Option<&str>,
    timeout: Duration,
    setup_deadline: Instant,
) -> Result<Value, RemoteCallError> {
    let setup = async {
        let reply_queue = channel
            .declare_reply_queue()
            .await
            .map_err(RemoteCallError::BrokerUnavailable)?;
        let pending = PendingRequest::new(topic, &reply_queue, timeout);

        // consumer must exist before the request goes out
        let replies = channel
            .consume(
                pending.reply_to(),
                &format!("rpc-{}", pending.correlation_id()),
            )
            .await
            .map_err(RemoteCallError::BrokerUnavailable)?;

        let body = payload.to_string();
        channel
            .publish(
                topic,
                body.as_bytes(),
                pending.reply_to(),
                pending.correlation_id(),
            )
            .await
            .map_err(RemoteCallError::BrokerUnavailable)?;
        tracing::debug!(
            topic = %topic,
            correlation_id = %pending.correlation_id(),
            reply_to = %pending.reply_to(),
            "rpc_request_published"
        );
        Ok::<_, RemoteCallError>((pending, replies))
    };

    let (pending, replies) = match timeout_at(setup_deadline, setup).await {
        Ok(ready) => ready?,
        Err(_) => return Err(setup_timed_out(topic, "preparing the request", timeout)),
    };
    pending.resolve(replies, expected_field).await
}

fn setup_timed_out(topic: &str, stage: &str, timeout: Duration) -> RemoteCallError {
    tracing::warn!(topic = %topic, stage, ?timeout, "rpc_broker_setup_timed_out");
    RemoteCallError::BrokerUnavailable(anyhow::anyhow!(
        "broker did not respond within {timeout:?} while {stage} for `{topic}`"
    ))
}
