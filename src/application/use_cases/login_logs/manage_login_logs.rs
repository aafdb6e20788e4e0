use crate::application::ports::login_log_repository::LoginLogRepository;
use crate::domain::customers::login_log::{LoginLog, LoginLogPatch, NewLoginLog};

pub struct ListLoginLogs<'a, R: LoginLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LoginLogRepository + ?Sized> ListLoginLogs<'a, R> {
    pub async fn execute(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<LoginLog>> {
        self.repo.list(id_customer).await
    }
}

pub struct GetLoginLog<'a, R: LoginLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LoginLogRepository + ?Sized> GetLoginLog<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<LoginLog>> {
        self.repo.find_by_id(id).await
    }
}

pub struct CreateLoginLog<'a, R: LoginLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LoginLogRepository + ?Sized> CreateLoginLog<'a, R> {
    pub async fn execute(&self, log: &NewLoginLog) -> anyhow::Result<LoginLog> {
        self.repo.create(log).await
    }
}

pub struct UpdateLoginLog<'a, R: LoginLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LoginLogRepository + ?Sized> UpdateLoginLog<'a, R> {
    pub async fn execute(&self, id: i32, patch: &LoginLogPatch) -> anyhow::Result<Option<LoginLog>> {
        self.repo.update(id, patch).await
    }
}

pub struct DeleteLoginLog<'a, R: LoginLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LoginLogRepository + ?Sized> DeleteLoginLog<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
