use super::register_customer::{hash_password, validate_role};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::validation::{self, ConflictError};
use crate::domain::customers::customer::{Customer, CustomerPatch};

pub struct UpdateCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub customer_type: Option<i32>,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: Option<bool>,
    pub loyalty_points: Option<i32>,
    pub role: Option<String>,
}

impl<'a, R: CustomerRepository + ?Sized> UpdateCustomer<'a, R> {
    pub async fn execute(
        &self,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> anyhow::Result<Option<Customer>> {
        for (field, value) in [
            ("name", &req.name),
            ("username", &req.username),
            ("first_name", &req.first_name),
            ("last_name", &req.last_name),
        ] {
            if let Some(v) = value {
                validation::non_empty(field, v)?;
            }
        }
        if let Some(role) = &req.role {
            validate_role(role)?;
        }
        let email = match &req.email {
            Some(e) => {
                validation::email("email", e)?;
                let e = e.trim().to_lowercase();
                if self.repo.email_taken(&e, Some(id)).await? {
                    return Err(ConflictError(format!("email {e} is already registered")).into());
                }
                Some(e)
            }
            None => None,
        };
        let password_hash = match &req.password {
            Some(p) => {
                validation::password(p)?;
                Some(hash_password(p)?)
            }
            None => None,
        };

        let patch = CustomerPatch {
            name: req.name.clone(),
            username: req.username.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone: req.phone.clone(),
            email,
            password_hash,
            customer_type: req.customer_type,
            preferred_contact_method: req.preferred_contact_method,
            opt_in_marketing: req.opt_in_marketing,
            loyalty_points: req.loyalty_points,
            role: req.role.clone(),
        };
        self.repo.update(id, &patch).await
    }
}
