use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::customers::customer::{
    Customer, CustomerCredentials, CustomerPatch, NewCustomer,
};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Customer>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Customer>>;
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<CustomerCredentials>>;
    async fn email_taken(&self, email: &str, except_id: Option<i32>) -> anyhow::Result<bool>;
    async fn create(&self, customer: &NewCustomer) -> anyhow::Result<Customer>;
    async fn update(&self, id: i32, patch: &CustomerPatch) -> anyhow::Result<Option<Customer>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
    async fn record_failed_login(&self, id: i32) -> anyhow::Result<()>;
    async fn record_successful_login(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()>;
}
