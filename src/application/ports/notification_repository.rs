use async_trait::async_trait;

use crate::domain::customers::notification::{Notification, NotificationPatch, NewNotification};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Notification>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Notification>>;
    async fn create(&self, notification: &NewNotification) -> anyhow::Result<Notification>;
    async fn update(
        &self,
        id: i32,
        patch: &NotificationPatch,
    ) -> anyhow::Result<Option<Notification>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
