pub mod companies;
pub mod customers;
