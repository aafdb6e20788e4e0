use crate::application::ports::notification_event_publisher::{
    NotificationCreatedEvent, NotificationEventPublisher,
};
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::validation;
use crate::domain::customers::notification::{
    NewNotification, Notification, NotificationPatch,
};

pub struct ListNotifications<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> ListNotifications<'a, R> {
    pub async fn execute(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Notification>> {
        self.repo.list(id_customer).await
    }
}

pub struct GetNotification<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> GetNotification<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Notification>> {
        self.repo.find_by_id(id).await
    }
}

/// Stores the notification, then announces it on the broker. The announcement
/// is best effort: a publish failure is logged and the stored row is returned.
pub struct CreateNotification<'a, R, P>
where
    R: NotificationRepository + ?Sized,
    P: NotificationEventPublisher + ?Sized,
{
    pub repo: &'a R,
    pub events: &'a P,
}

impl<'a, R, P> CreateNotification<'a, R, P>
where
    R: NotificationRepository + ?Sized,
    P: NotificationEventPublisher + ?Sized,
{
    pub async fn execute(&self, notification: &NewNotification) -> anyhow::Result<Notification> {
        validation::non_empty("message", &notification.message)?;
        let created = self.repo.create(notification).await?;
        let event = NotificationCreatedEvent::new(
            created.id_customer,
            created.message.clone(),
            created.notification_type,
            created.date_created,
        );
        if let Err(err) = self.events.publish(&event).await {
            tracing::warn!(
                notification_id = created.id,
                customer_id = created.id_customer,
                error = ?err,
                "notification_event_publish_failed"
            );
        }
        Ok(created)
    }
}

pub struct UpdateNotification<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> UpdateNotification<'a, R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: &NotificationPatch,
    ) -> anyhow::Result<Option<Notification>> {
        if let Some(message) = &patch.message {
            validation::non_empty("message", message)?;
        }
        self.repo.update(id, patch).await
    }
}

pub struct DeleteNotification<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> DeleteNotification<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::testing::{InMemoryNotifications, RecordingPublisher};

    fn welcome() -> NewNotification {
        NewNotification {
            id_customer: 3,
            message: "Your order shipped".into(),
            is_read: false,
            notification_type: 1,
        }
    }

    #[tokio::test]
    async fn created_notification_is_announced() {
        let repo = InMemoryNotifications::default();
        let events = RecordingPublisher::default();
        let uc = CreateNotification {
            repo: &repo,
            events: &events,
        };

        let created = uc.execute(&welcome()).await.unwrap();
        let events = events.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "notification_created");
        assert_eq!(events[0].customer_id, 3);
        assert_eq!(events[0].message, created.message);
    }

    #[tokio::test]
    async fn broker_failure_does_not_lose_the_row() {
        let repo = InMemoryNotifications::default();
        let events = RecordingPublisher {
            fail: true,
            ..Default::default()
        };
        let uc = CreateNotification {
            repo: &repo,
            events: &events,
        };

        uc.execute(&welcome()).await.unwrap();
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let repo = InMemoryNotifications::default();
        let events = RecordingPublisher::default();
        let uc = CreateNotification {
            repo: &repo,
            events: &events,
        };
        let mut n = welcome();
        n.message = String::new();
        assert!(uc.execute(&n).await.is_err());
        assert!(events.events.lock().unwrap().is_empty());
    }
}
