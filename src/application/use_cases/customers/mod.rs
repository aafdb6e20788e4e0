pub mod manage_customers;
pub mod register_customer;
pub mod update_customer;
