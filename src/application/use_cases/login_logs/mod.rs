pub mod manage_login_logs;
