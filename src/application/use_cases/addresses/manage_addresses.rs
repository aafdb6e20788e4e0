use crate::application::ports::address_repository::AddressRepository;
use crate::application::validation::{self, ValidationError};
use crate::domain::customers::address::{Address, AddressPatch, NewAddress};

fn validate_new(address: &NewAddress) -> Result<(), ValidationError> {
    validation::non_empty("address_line1", &address.address_line1)?;
    validation::non_empty("city", &address.city)?;
    validation::postal_code(&address.postal_code)?;
    validation::non_empty("country", &address.country)?;
    Ok(())
}

fn validate_patch(patch: &AddressPatch) -> Result<(), ValidationError> {
    if let Some(v) = &patch.address_line1 {
        validation::non_empty("address_line1", v)?;
    }
    if let Some(v) = &patch.city {
        validation::non_empty("city", v)?;
    }
    if let Some(v) = &patch.postal_code {
        validation::postal_code(v)?;
    }
    if let Some(v) = &patch.country {
        validation::non_empty("country", v)?;
    }
    Ok(())
}

pub struct ListAddresses<'a, R: AddressRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AddressRepository + ?Sized> ListAddresses<'a, R> {
    pub async fn execute(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Address>> {
        self.repo.list(id_customer).await
    }
}

pub struct GetAddress<'a, R: AddressRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AddressRepository + ?Sized> GetAddress<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Address>> {
        self.repo.find_by_id(id).await
    }
}

pub struct CreateAddress<'a, R: AddressRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AddressRepository + ?Sized> CreateAddress<'a, R> {
    pub async fn execute(&self, address: &NewAddress) -> anyhow::Result<Address> {
        validate_new(address)?;
        self.repo.create(address).await
    }
}

pub struct UpdateAddress<'a, R: AddressRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AddressRepository + ?Sized> UpdateAddress<'a, R> {
    pub async fn execute(&self, id: i32, patch: &AddressPatch) -> anyhow::Result<Option<Address>> {
        validate_patch(patch)?;
        self.repo.update(id, patch).await
    }
}

pub struct DeleteAddress<'a, R: AddressRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AddressRepository + ?Sized> DeleteAddress<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
