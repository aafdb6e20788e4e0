pub mod address_repository_sqlx;
pub mod company_repository_sqlx;
pub mod customer_company_repository_sqlx;
pub mod customer_repository_sqlx;
pub mod feedback_repository_sqlx;
pub mod login_log_repository_sqlx;
pub mod notification_repository_sqlx;
