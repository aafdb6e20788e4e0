use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::customer::Customer;

pub struct ListCustomers<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> ListCustomers<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Customer>> {
        self.repo.list().await
    }
}

pub struct GetCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> GetCustomer<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Customer>> {
        self.repo.find_by_id(id).await
    }
}

pub struct DeleteCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> DeleteCustomer<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(customer_id = id, "customer_deleted");
        }
        Ok(deleted)
    }
}
