pub mod manage_companies;
