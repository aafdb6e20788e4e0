use async_trait::async_trait;

use crate::domain::companies::customer_company::CustomerCompany;

#[async_trait]
pub trait CustomerCompanyRepository: Send + Sync {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<CustomerCompany>>;
    async fn exists(&self, link: CustomerCompany) -> anyhow::Result<bool>;
    async fn create(&self, link: CustomerCompany) -> anyhow::Result<CustomerCompany>;
    /// Moves an existing link to another company. Returns `None` when `current` is unknown.
    async fn update(
        &self,
        current: CustomerCompany,
        id_company: i32,
    ) -> anyhow::Result<Option<CustomerCompany>>;
    async fn delete(&self, link: CustomerCompany) -> anyhow::Result<bool>;
}
