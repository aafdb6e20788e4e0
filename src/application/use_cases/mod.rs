pub mod addresses;
pub mod auth;
pub mod companies;
pub mod customer_companies;
pub mod customers;
pub mod feedback;
pub mod login_logs;
pub mod notifications;
pub mod orders;

#[cfg(test)]
pub(crate) mod testing;
