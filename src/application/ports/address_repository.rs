use async_trait::async_trait;

use crate::domain::customers::address::{Address, AddressPatch, NewAddress};

#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// `None` lists every address.
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Address>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Address>>;
    async fn create(&self, address: &NewAddress) -> anyhow::Result<Address>;
    async fn update(&self, id: i32, patch: &AddressPatch) -> anyhow::Result<Option<Address>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
