use async_trait::async_trait;

use crate::domain::customers::login_log::{LoginLog, LoginLogPatch, NewLoginLog};

#[async_trait]
pub trait LoginLogRepository: Send + Sync {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<LoginLog>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<LoginLog>>;
    async fn create(&self, log: &NewLoginLog) -> anyhow::Result<LoginLog>;
    async fn update(&self, id: i32, patch: &LoginLogPatch) -> anyhow::Result<Option<LoginLog>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
