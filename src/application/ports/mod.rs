pub mod address_repository;
pub mod company_repository;
pub mod customer_company_repository;
pub mod customer_repository;
pub mod feedback_repository;
pub mod login_log_repository;
pub mod notification_event_publisher;
pub mod notification_repository;
pub mod remote_query_port;
