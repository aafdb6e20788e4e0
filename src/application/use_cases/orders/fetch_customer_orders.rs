use std::time::Duration;

use serde_json::{Value, json};

use super::CUSTOMER_ORDERS_TOPIC;
use crate::application::ports::remote_query_port::{RemoteCallError, RemoteQueryPort};

pub struct FetchCustomerOrders<'a, R: RemoteQueryPort + ?Sized> {
    pub remote: &'a R,
    pub timeout: Duration,
}

impl<'a, R: RemoteQueryPort + ?Sized> FetchCustomerOrders<'a, R> {
    pub async fn execute(&self, customer_id: i32) -> Result<Vec<Value>, RemoteCallError> {
        let reply = self
            .remote
            .call(
                CUSTOMER_ORDERS_TOPIC,
                &json!({ "customer_id": customer_id }),
                Some("orders"),
                self.timeout,
            )
            .await?;
        match reply {
            Value::Array(orders) => Ok(orders),
            other => {
                tracing::warn!(customer_id, reply = %other, "customer_orders_reply_not_a_list");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::testing::ScriptedRemote;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn returns_orders_from_reply() {
        let remote = ScriptedRemote::with(vec![Ok(json!([{"id_order": 7, "status": 1}]))]);
        let uc = FetchCustomerOrders {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let orders = uc.execute(42).await.unwrap();
        assert_eq!(orders, vec![json!({"id_order": 7, "status": 1})]);

        let calls = remote.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].topic, "customer.orders.request");
        assert_eq!(calls[0].payload, json!({"customer_id": 42}));
        assert_eq!(calls[0].expected_field.as_deref(), Some("orders"));
        assert_eq!(calls[0].timeout, TIMEOUT);
    }

    #[tokio::test]
    async fn timeout_is_surfaced() {
        let remote = ScriptedRemote::with(vec![Err(RemoteCallError::RequestTimeout {
            topic: CUSTOMER_ORDERS_TOPIC.into(),
            correlation_id: "c-1".into(),
        })]);
        let uc = FetchCustomerOrders {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let err = uc.execute(42).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteCallError::RequestTimeout { ref topic, ref correlation_id }
                if topic == "customer.orders.request" && correlation_id == "c-1"
        ));
    }

    #[tokio::test]
    async fn non_list_orders_degrade_to_empty() {
        let remote = ScriptedRemote::with(vec![Ok(json!({"unexpected": true}))]);
        let uc = FetchCustomerOrders {
            remote: &remote,
            timeout: TIMEOUT,
        };
        assert!(uc.execute(42).await.unwrap().is_empty());
    }
}
