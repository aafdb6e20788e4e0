use std::pin::pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tokio::time::{Instant, timeout_at};
use uuid::Uuid;

use super::reply::{DecodedReply, decode_reply};
use crate::application::ports::remote_query_port::RemoteCallError;

/// A message that arrived on a private reply queue.
#[async_trait]
pub trait ReplyDelivery: Send + Sync {
    fn correlation_id(&self) -> Option<&str>;
    fn body(&self) -> &[u8];
    /// Acknowledge a reply that was consumed.
    async fn accept(&self) -> anyhow::Result<()>;
    /// Drop a reply that belongs to nobody, without redelivery.
    async fn discard(&self) -> anyhow::Result<()>;
}

/// An outstanding request waiting for the one reply carrying its correlation id.
///
/// `resolve` consumes the request, so the outcome is produced exactly once:
/// the first matching reply, a timeout, or a broker failure.
#[derive(Debug)]
pub struct PendingRequest {
    topic: String,
    correlation_id: String,
    reply_to: String,
    deadline: Instant,
}

impl PendingRequest {
    pub fn new(topic: &str, reply_to: &str, timeout: Duration) -> Self {
        Self {
            topic: topic.to_string(),
            correlation_id: Uuid::new_v4().to_string(),
            reply_to: reply_to.to_string(),
            deadline: Instant::now() + timeout,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn reply_to(&self) -> &str {
        &self.reply_to
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn matches(&self, candidate: Option<&str>) -> bool {
        candidate == Some(self.correlation_id.as_str())
    }

    pub async fn resolve<S, D>(
        self,
        deliveries: S,
        expected_field: Option<&str>,
    ) -> Result<Value, RemoteCallError>
    where
        S: Stream<Item = anyhow::Result<D>> + Send,
        D: ReplyDelivery,
    {
        let outcome = timeout_at(
            self.deadline,
            self.first_match(deliveries, expected_field),
        )
        .await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    topic = %self.topic,
                    correlation_id = %self.correlation_id,
                    "rpc_request_timed_out"
                );
                Err(RemoteCallError::RequestTimeout {
                    topic: self.topic,
                    correlation_id: self.correlation_id,
                })
            }
        }
    }

    async fn first_match<S, D>(
        &self,
        deliveries: S,
        expected_field: Option<&str>,
    ) -> Result<Value, RemoteCallError>
    where
        S: Stream<Item = anyhow::Result<D>> + Send,
        D: ReplyDelivery,
    {
        let mut deliveries = pin!(deliveries);
        while let Some(next) = deliveries.next().await {
            let delivery = next.map_err(RemoteCallError::BrokerUnavailable)?;
            if !self.matches(delivery.correlation_id()) {
                tracing::warn!(
                    topic = %self.topic,
                    expected = %self.correlation_id,
                    received = ?delivery.correlation_id(),
                    "rpc_correlation_mismatch"
                );
                if let Err(err) = delivery.discard().await {
                    tracing::warn!(error = ?err, reply_to = %self.reply_to, "rpc_reply_reject_failed");
                }
                continue;
            }

            if let Err(err) = delivery.accept().await {
                tracing::warn!(error = ?err, reply_to = %self.reply_to, "rpc_reply_ack_failed");
            }
            let decoded = decode_reply(delivery.body(), expected_field);
            if let DecodedReply::Malformed(reason) = &decoded {
                tracing::error!(
                    topic = %self.topic,
                    correlation_id = %self.correlation_id,
                    reason = %reason,
                    raw_body = %String::from_utf8_lossy(delivery.body()),
                    "rpc_reply_decode_failed"
                );
            }
            return Ok(decoded.into_value());
        }
        Err(RemoteCallError::BrokerUnavailable(anyhow::anyhow!(
            "reply consumer on `{}` closed before a reply arrived",
            self.reply_to
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::rpc::testing::{Journal, MemoryDelivery, memory_queue};
    use serde_json::json;
    use tokio::time::sleep;

    fn reply(journal: &Journal, correlation_id: Option<&str>, body: &[u8]) -> MemoryDelivery {
        MemoryDelivery::new(journal, correlation_id, body)
    }

    fn queue() -> (
        tokio::sync::mpsc::UnboundedSender<MemoryDelivery>,
        impl Stream<Item = anyhow::Result<MemoryDelivery>> + Send,
    ) {
        memory_queue()
    }

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn resolves_with_matching_reply() {
        let journal = Journal::default();
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-1", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        tx.send(reply(&journal, Some(&id), br#"{"orders": [{"id_order": 7}]}"#))
            .unwrap();

        let out = pending.resolve(stream, Some("orders")).await.unwrap();
        assert_eq!(out, json!([{"id_order": 7}]));
        assert_eq!(*journal.lock().unwrap(), vec![format!("ack:{id}")]);
    }

    #[tokio::test]
    async fn foreign_reply_is_rejected_and_never_resolves() {
        let journal = Journal::default();
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-2", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        tx.send(reply(&journal, Some("someone-else"), br#"{"orders": [1]}"#))
            .unwrap();
        tx.send(reply(&journal, None, br#"{"orders": [2]}"#)).unwrap();
        tx.send(reply(&journal, Some(&id), br#"{"orders": [3]}"#))
            .unwrap();

        let out = pending.resolve(stream, Some("orders")).await.unwrap();
        assert_eq!(out, json!([3]));
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "reject:someone-else".to_string(),
                "reject:-".to_string(),
                format!("ack:{id}"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_only_foreign_replies_arrive() {
        let journal = Journal::default();
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-3", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        tx.send(reply(&journal, Some("stale"), br#"{"orders": []}"#))
            .unwrap();

        let err = pending.resolve(stream, Some("orders")).await.unwrap_err();
        match err {
            RemoteCallError::RequestTimeout {
                topic,
                correlation_id,
            } => {
                assert_eq!(topic, "customer.orders.request");
                assert_eq!(correlation_id, id);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_just_before_deadline_is_accepted() {
        let journal = Journal::default();
        let pending = PendingRequest::new("order.products.request", "amq.gen-4", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        let j = journal.clone();
        tokio::spawn(async move {
            sleep(TIMEOUT - Duration::from_millis(1)).await;
            let _ = tx.send(reply(&j, Some(&id), br#"{"products": [101]}"#));
        });

        let out = pending.resolve(stream, Some("products")).await.unwrap();
        assert_eq!(out, json!([101]));
    }

    #[tokio::test(start_paused = true)]
    async fn reply_just_after_deadline_does_not_resolve() {
        let journal = Journal::default();
        let pending = PendingRequest::new("order.products.request", "amq.gen-5", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        let j = journal.clone();
        tokio::spawn(async move {
            sleep(TIMEOUT + Duration::from_millis(1)).await;
            let _ = tx.send(reply(&j, Some(&id), br#"{"products": [101]}"#));
        });

        let err = pending.resolve(stream, Some("products")).await.unwrap_err();
        assert!(matches!(err, RemoteCallError::RequestTimeout { .. }));
        assert!(journal.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_reply_resolves_to_empty_list() {
        let journal = Journal::default();
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-6", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        tx.send(reply(&journal, Some(&id), b"not json{")).unwrap();

        let out = pending.resolve(stream, Some("orders")).await.unwrap();
        assert_eq!(out, json!([]));
        assert_eq!(*journal.lock().unwrap(), vec![format!("ack:{id}")]);
    }

    #[tokio::test]
    async fn concurrent_requests_do_not_cross_deliver() {
        let journal = Journal::default();
        let first = PendingRequest::new("customer.orders.request", "amq.gen-a", TIMEOUT);
        let second = PendingRequest::new("customer.orders.request", "amq.gen-b", TIMEOUT);
        let (tx_a, stream_a) = queue();
        let (tx_b, stream_b) = queue();
        let id_a = first.correlation_id().to_string();
        let id_b = second.correlation_id().to_string();
        assert_ne!(id_a, id_b);

        // each queue first sees the other call's reply
        tx_a.send(reply(&journal, Some(&id_b), br#"{"orders": ["b"]}"#))
            .unwrap();
        tx_b.send(reply(&journal, Some(&id_a), br#"{"orders": ["a"]}"#))
            .unwrap();
        tx_a.send(reply(&journal, Some(&id_a), br#"{"orders": ["a"]}"#))
            .unwrap();
        tx_b.send(reply(&journal, Some(&id_b), br#"{"orders": ["b"]}"#))
            .unwrap();

        let (a, b) = tokio::join!(
            first.resolve(stream_a, Some("orders")),
            second.resolve(stream_b, Some("orders"))
        );
        assert_eq!(a.unwrap(), json!(["a"]));
        assert_eq!(b.unwrap(), json!(["b"]));
    }

    #[tokio::test]
    async fn only_first_matching_reply_is_consumed() {
        let journal = Journal::default();
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-7", TIMEOUT);
        let (tx, stream) = queue();
        let id = pending.correlation_id().to_string();
        tx.send(reply(&journal, Some(&id), br#"{"orders": [1]}"#))
            .unwrap();
        tx.send(reply(&journal, Some(&id), br#"{"orders": [2]}"#))
            .unwrap();

        let out = pending.resolve(stream, Some("orders")).await.unwrap();
        assert_eq!(out, json!([1]));
        assert_eq!(journal.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn closed_reply_stream_is_a_broker_failure() {
        let pending = PendingRequest::new("customer.orders.request", "amq.gen-8", TIMEOUT);
        let (tx, stream) = queue();
        drop(tx);

        let err = pending.resolve(stream, Some("orders")).await.unwrap_err();
        assert!(matches!(err, RemoteCallError::BrokerUnavailable(_)));
    }

    #[test]
    fn correlation_ids_are_random_v4_uuids() {
        let a = PendingRequest::new("t", "q", TIMEOUT);
        let b = PendingRequest::new("t", "q", TIMEOUT);
        assert_ne!(a.correlation_id(), b.correlation_id());
        let parsed = Uuid::parse_str(a.correlation_id()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert!(a.matches(Some(a.correlation_id())));
        assert!(!a.matches(Some(b.correlation_id())));
        assert!(!a.matches(None));
    }
}
