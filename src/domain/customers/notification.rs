use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i32,
    pub id_customer: i32,
    pub message: String,
    pub date_created: DateTime<Utc>,
    pub is_read: bool,
    pub notification_type: i32,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub id_customer: i32,
    pub message: String,
    pub is_read: bool,
    pub notification_type: i32,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub message: Option<String>,
    pub is_read: Option<bool>,
    pub notification_type: Option<i32>,
}
