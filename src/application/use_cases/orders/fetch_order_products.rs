use std::time::Duration;

use serde_json::{Value, json};

use super::{ORDER_PRODUCTS_TOPIC, PRODUCT_DETAILS_TOPIC};
use crate::application::ports::remote_query_port::{RemoteCallError, RemoteQueryPort};

/// Resolves the products of one order: product ids from the order service,
/// then their details from the product service.
pub struct FetchOrderProducts<'a, R: RemoteQueryPort + ?Sized> {
    pub remote: &'a R,
    pub timeout: Duration,
}

impl<'a, R: RemoteQueryPort + ?Sized> FetchOrderProducts<'a, R> {
    pub async fn execute(
        &self,
        customer_id: i32,
        order_id: i32,
    ) -> Result<Vec<Value>, RemoteCallError> {
        let ids = self
            .remote
            .call(
                ORDER_PRODUCTS_TOPIC,
                &json!({ "order_id": order_id }),
                Some("products"),
                self.timeout,
            )
            .await?;
        let Value::Array(ids) = ids else {
            return Err(RemoteCallError::MalformedReply {
                topic: ORDER_PRODUCTS_TOPIC.to_string(),
                reason: "product ids are not a list".to_string(),
            });
        };
        if ids.is_empty() {
            tracing::debug!(customer_id, order_id, "order_has_no_products");
            return Ok(Vec::new());
        }

        let details = self
            .remote
            .call(
                PRODUCT_DETAILS_TOPIC,
                &json!({ "product_ids": ids }),
                Some("products"),
                self.timeout,
            )
            .await?;
        match details {
            Value::Array(products) => Ok(products),
            other => {
                tracing::warn!(
                    customer_id,
                    order_id,
                    reply = %other,
                    "product_details_reply_not_a_list"
                );
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
    async fn fetches_ids_then_details() {
        let remote = ScriptedRemote::with(vec![
            Ok(json!([101, 102])),
            Ok(json!([{"id": 101, "name": "Lamp"}, {"id": 102, "name": "Desk"}])),
        ]);
        let uc = FetchOrderProducts {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let products = uc.execute(42, 7).await.unwrap();
        assert_eq!(
            products,
            vec![
                json!({"id": 101, "name": "Lamp"}),
                json!({"id": 102, "name": "Desk"})
            ]
        );

        let calls = remote.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].topic, "order.products.request");
        assert_eq!(calls[0].payload, json!({"order_id": 7}));
        assert_eq!(calls[0].expected_field.as_deref(), Some("products"));
        assert_eq!(calls[1].topic, "product_details_queue");
        assert_eq!(calls[1].payload, json!({"product_ids": [101, 102]}));
    }

    #[tokio::test]
    async fn empty_order_skips_product_lookup() {
        let remote = ScriptedRemote::with(vec![Ok(json!([]))]);
        let uc = FetchOrderProducts {
            remote: &remote,
            timeout: TIMEOUT,
        };

        assert!(uc.execute(42, 7).await.unwrap().is_empty());
        assert_eq!(remote.calls().len(), 1);
    }

    #[tokio::test]
    async fn non_list_ids_fail_fast() {
        let remote = ScriptedRemote::with(vec![Ok(json!({"id": 101}))]);
        let uc = FetchOrderProducts {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let err = uc.execute(42, 7).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteCallError::MalformedReply { ref topic, .. } if topic == "order.products.request"
        ));
        assert_eq!(remote.calls().len(), 1);
    }

    #[tokio::test]
    async fn non_list_details_degrade_to_no_products() {
        for details in [json!({"id": 101}), json!({"products": 5})] {
            let remote = ScriptedRemote::with(vec![Ok(json!([101])), Ok(details)]);
            let uc = FetchOrderProducts {
                remote: &remote,
                timeout: TIMEOUT,
            };

            assert!(uc.execute(42, 7).await.unwrap().is_empty());
            assert_eq!(remote.calls().len(), 2);
        }
    }

    #[tokio::test]
    async fn first_stage_failure_stops_the_workflow() {
        let remote = ScriptedRemote::with(vec![Err(RemoteCallError::BrokerUnavailable(
            anyhow::anyhow!("connection refused"),
        ))]);
        let uc = FetchOrderProducts {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let err = uc.execute(42, 7).await.unwrap_err();
        assert!(matches!(err, RemoteCallError::BrokerUnavailable(_)));
        assert_eq!(remote.calls().len(), 1);
    }

    #[tokio::test]
    async fn second_stage_timeout_is_surfaced() {
        let remote = ScriptedRemote::with(vec![
            Ok(json!([101])),
            Err(RemoteCallError::RequestTimeout {
                topic: PRODUCT_DETAILS_TOPIC.into(),
                correlation_id: "c-2".into(),
            }),
        ]);
        let uc = FetchOrderProducts {
            remote: &remote,
            timeout: TIMEOUT,
        };

        let err = uc.execute(42, 7).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteCallError::RequestTimeout { ref topic, .. } if topic == "product_details_queue"
        ));
    }
}
