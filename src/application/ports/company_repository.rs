use async_trait::async_trait;

use crate::domain::companies::company::{Company, CompanyPatch, NewCompany};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Company>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Company>>;
    async fn create(&self, company: &NewCompany) -> anyhow::Result<Company>;
    async fn update(&self, id: i32, patch: &CompanyPatch) -> anyhow::Result<Option<Company>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
