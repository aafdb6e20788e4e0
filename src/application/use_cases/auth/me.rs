use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::customer::Customer;

pub struct GetMe<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Customer>> {
        self.repo.find_by_id(id).await
    }
}
