use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::Utc;

use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::login_log_repository::LoginLogRepository;
use crate::domain::customers::login_log::NewLoginLog;

pub struct Login<'a, C, L>
where
    C: CustomerRepository + ?Sized,
    L: LoginLogRepository + ?Sized,
{
    pub customers: &'a C,
    pub login_logs: &'a L,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCustomer {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl<'a, C, L> Login<'a, C, L>
where
    C: CustomerRepository + ?Sized,
    L: LoginLogRepository + ?Sized,
{
    /// `Ok(None)` for an unknown email or a wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<AuthenticatedCustomer>> {
        let creds = match self
            .customers
            .find_credentials_by_email(&req.email.trim().to_lowercase())
            .await?
        {
            Some(c) => c,
            None => return Ok(None),
        };
        let parsed =
            PasswordHash::new(&creds.password_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            self.customers.record_failed_login(creds.id).await?;
            tracing::info!(customer_id = creds.id, "login_rejected_bad_password");
            return Ok(None);
        }

        let now = Utc::now();
        self.customers.record_successful_login(creds.id, now).await?;
        let log = NewLoginLog {
            id_customer: creds.id,
            login_time: now,
            ip_address: req.ip_address.clone(),
            user_agent: req.user_agent.clone(),
        };
        if let Err(err) = self.login_logs.create(&log).await {
            tracing::warn!(customer_id = creds.id, error = ?err, "login_log_write_failed");
        }

        Ok(Some(AuthenticatedCustomer {
            id: creds.id,
            email: creds.email,
            role: creds.role,
        }))
    }
}
