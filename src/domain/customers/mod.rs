pub mod address;
pub mod customer;
pub mod feedback;
pub mod login_log;
pub mod notification;
