pub mod manage_links;
