pub mod company;
pub mod customer_company;
