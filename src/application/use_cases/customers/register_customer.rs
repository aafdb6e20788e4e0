use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::validation::{self, ConflictError, ValidationError};
use crate::domain::customers::customer::{Customer, NewCustomer, ROLE_ADMIN, ROLE_CUSTOMER};

pub struct RegisterCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    pub customer_type: i32,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: bool,
    pub loyalty_points: i32,
    pub role: String,
}

pub(crate) fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string())
}

pub(crate) fn validate_role(role: &str) -> Result<(), ValidationError> {
    if role == ROLE_ADMIN || role == ROLE_CUSTOMER {
        Ok(())
    } else {
        Err(ValidationError::new("role", "must be `admin` or `customer`"))
    }
}

impl<'a, R: CustomerRepository + ?Sized> RegisterCustomer<'a, R> {
    pub async fn execute(&self, req: &RegisterCustomerRequest) -> anyhow::Result<Customer> {
        validation::non_empty("name", &req.name)?;
        validation::non_empty("username", &req.username)?;
        validation::non_empty("first_name", &req.first_name)?;
        validation::non_empty("last_name", &req.last_name)?;
        validation::email("email", &req.email)?;
        validation::password(&req.password)?;
        validate_role(&req.role)?;

        let email = req.email.trim().to_lowercase();
        if self.repo.email_taken(&email, None).await? {
            return Err(ConflictError(format!("email {email} is already registered")).into());
        }

        let customer = NewCustomer {
            name: req.name.trim().to_string(),
            username: req.username.trim().to_string(),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            phone: req.phone.clone(),
            email,
            password_hash: hash_password(&req.password)?,
            customer_type: req.customer_type,
            preferred_contact_method: req.preferred_contact_method,
            opt_in_marketing: req.opt_in_marketing,
            loyalty_points: req.loyalty_points.max(0),
            role: req.role.clone(),
        };
        let created = self.repo.create(&customer).await?;
        tracing::info!(customer_id = created.id, "customer_registered");
        Ok(created)
    }
}

#[cfg(test)]
impl RegisterCustomerRequest {
    pub fn sample(email: &str, password: &str) -> Self {
        Self {
            name: "Jane Doe".into(),
            username: "jane".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: None,
            email: email.into(),
            password: password.into(),
            customer_type: 1,
            preferred_contact_method: None,
            opt_in_marketing: false,
            loyalty_points: 0,
            role: ROLE_CUSTOMER.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::testing::InMemoryCustomers;

    #[tokio::test]
    async fn stores_a_hash_not_the_password() {
        let repo = InMemoryCustomers::default();
        let uc = RegisterCustomer { repo: &repo };

        let created = uc
            .execute(&RegisterCustomerRequest::sample("Jane@Example.com", "s3cret-pass"))
            .await
            .unwrap();
        assert_eq!(created.email, "jane@example.com");
        assert_eq!(created.role, "customer");

        let rows = repo.rows.lock().unwrap();
        assert!(rows[0].1.starts_with("$argon2"));
        assert!(!rows[0].1.contains("s3cret-pass"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryCustomers::default();
        let uc = RegisterCustomer { repo: &repo };
        uc.execute(&RegisterCustomerRequest::sample("jane@example.com", "s3cret-pass"))
            .await
            .unwrap();

        let err = uc
            .execute(&RegisterCustomerRequest::sample("jane@example.com", "other-pass"))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ConflictError>().is_some());
    }

    #[tokio::test]
    async fn rejects_short_password_and_unknown_role() {
        let repo = InMemoryCustomers::default();
        let uc = RegisterCustomer { repo: &repo };

        let err = uc
            .execute(&RegisterCustomerRequest::sample("jane@example.com", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>().unwrap().field, "password");

        let mut req = RegisterCustomerRequest::sample("jane@example.com", "s3cret-pass");
        req.role = "superuser".into();
        let err = uc.execute(&req).await.unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>().unwrap().field, "role");
        assert!(repo.rows.lock().unwrap().is_empty());
    }
}
