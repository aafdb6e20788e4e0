use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationCreatedEvent {
    pub event: &'static str,
    pub customer_id: i32,
    pub message: String,
    pub notification_type: i32,
    pub date_created: DateTime<Utc>,
}

impl NotificationCreatedEvent {
    pub fn new(
        customer_id: i32,
        message: impl Into<String>,
        notification_type: i32,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            event: "notification_created",
            customer_id,
            message: message.into(),
            notification_type,
            date_created,
        }
    }
}

#[async_trait]
pub trait NotificationEventPublisher: Send + Sync {
    async fn publish(&self, event: &NotificationCreatedEvent) -> anyhow::Result<()>;
}
