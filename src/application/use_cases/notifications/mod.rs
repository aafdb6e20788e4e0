pub mod manage_notifications;
