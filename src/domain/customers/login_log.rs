use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LoginLog {
    pub id: i32,
    pub id_customer: i32,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewLoginLog {
    pub id_customer: i32,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoginLogPatch {
    pub login_time: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
