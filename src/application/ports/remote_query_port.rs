use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum RemoteCallError {
    #[error("request to `{topic}` timed out (correlation id {correlation_id})")]
    RequestTimeout {
        topic: String,
        correlation_id: String,
    },
    #[error("message broker unavailable")]
    BrokerUnavailable(#[source] anyhow::Error),
    #[error("unexpected reply from `{topic}`: {reason}")]
    MalformedReply { topic: String, reason: String },
}

/// One request / one reply round trip against a sibling service.
///
/// `expected_field` names the key holding the result when the reply is an
/// object; a bare list reply is returned as is. Undecodable replies resolve
/// to an empty list rather than an error.
#[async_trait]
pub trait RemoteQueryPort: Send + Sync {
    async fn call(
        &self,
        topic: &str,
        payload: &Value,
        expected_field: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, RemoteCallError>;
}
