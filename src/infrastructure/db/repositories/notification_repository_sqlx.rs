use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::customers::notification::{
    NewNotification, Notification, NotificationPatch,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxNotificationRepository {
    pub pool: PgPool,
}

impl SqlxNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn notification_from_row(r: &PgRow) -> Notification {
    Notification {
        id: r.get("id_notification"),
        id_customer: r.get("id_customer"),
        message: r.get("message"),
        date_created: r.get("date_created"),
        is_read: r.get("is_read"),
        notification_type: r.get("type"),
    }
}

#[async_trait]
impl NotificationRepository for SqlxNotificationRepository {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Notification>> {
        let rows = sqlx::query(
            r#"SELECT id_notification, id_customer, message, date_created, is_read, type
               FROM notifications
               WHERE ($1::INT IS NULL OR id_customer = $1)
               ORDER BY date_created DESC"#,
        )
        .bind(id_customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(notification_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Notification>> {
        let row = sqlx::query(
            r#"SELECT id_notification, id_customer, message, date_created, is_read, type
               FROM notifications WHERE id_notification = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(notification_from_row))
    }

    async fn create(&self, n: &NewNotification) -> anyhow::Result<Notification> {
        let row = sqlx::query(
            r#"INSERT INTO notifications (id_customer, message, is_read, type)
               VALUES ($1, $2, $3, $4)
               RETURNING id_notification, id_customer, message, date_created, is_read, type"#,
        )
        .bind(n.id_customer)
        .bind(&n.message)
        .bind(n.is_read)
        .bind(n.notification_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification_from_row(&row))
    }

    async fn update(
        &self,
        id: i32,
        p: &NotificationPatch,
    ) -> anyhow::Result<Option<Notification>> {
        let row = sqlx::query(
            r#"UPDATE notifications SET
                   message = COALESCE($2, message),
                   is_read = COALESCE($3, is_read),
                   type = COALESCE($4, type)
               WHERE id_notification = $1
               RETURNING id_notification, id_customer, message, date_created, is_read, type"#,
        )
        .bind(id)
        .bind(&p.message)
        .bind(p.is_read)
        .bind(p.notification_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(notification_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM notifications WHERE id_notification = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
