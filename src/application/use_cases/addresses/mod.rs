pub mod manage_addresses;
