use chrono::{DateTime, Utc};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub last_login: Option<DateTime<Utc>>,
    pub customer_type: i32,
    pub failed_login_attempts: i32,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: bool,
    pub loyalty_points: i32,
    pub role: String,
}

impl Customer {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Row to insert. `password_hash` is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub customer_type: i32,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: bool,
    pub loyalty_points: i32,
    pub role: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub customer_type: Option<i32>,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: Option<bool>,
    pub loyalty_points: Option<i32>,
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CustomerCredentials {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}
