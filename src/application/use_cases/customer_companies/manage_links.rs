use crate::application::ports::company_repository::CompanyRepository;
use crate::application::ports::customer_company_repository::CustomerCompanyRepository;
use crate::application::validation::{ConflictError, ValidationError};
use crate::domain::companies::customer_company::CustomerCompany;

pub struct ListCustomerCompanies<'a, R: CustomerCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerCompanyRepository + ?Sized> ListCustomerCompanies<'a, R> {
    pub async fn execute(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<CustomerCompany>> {
        self.repo.list(id_customer).await
    }
}

pub struct GetCustomerCompany<'a, R: CustomerCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerCompanyRepository + ?Sized> GetCustomerCompany<'a, R> {
    pub async fn execute(&self, link: CustomerCompany) -> anyhow::Result<Option<CustomerCompany>> {
        Ok(self.repo.exists(link).await?.then_some(link))
    }
}

pub struct LinkCustomerCompany<'a, R, C>
where
    R: CustomerCompanyRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    pub repo: &'a R,
    pub companies: &'a C,
}

impl<'a, R, C> LinkCustomerCompany<'a, R, C>
where
    R: CustomerCompanyRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    pub async fn execute(&self, link: CustomerCompany) -> anyhow::Result<CustomerCompany> {
        if self.companies.find_by_id(link.id_company).await?.is_none() {
            return Err(ValidationError::new("id_company", "unknown company").into());
        }
        if self.repo.exists(link).await? {
            return Err(ConflictError(format!(
                "customer {} already belongs to company {}",
                link.id_customer, link.id_company
            ))
            .into());
        }
        self.repo.create(link).await
    }
}

pub struct MoveCustomerCompany<'a, R, C>
where
    R: CustomerCompanyRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    pub repo: &'a R,
    pub companies: &'a C,
}

impl<'a, R, C> MoveCustomerCompany<'a, R, C>
where
    R: CustomerCompanyRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    pub async fn execute(
        &self,
        current: CustomerCompany,
        id_company: i32,
    ) -> anyhow::Result<Option<CustomerCompany>> {
        if self.companies.find_by_id(id_company).await?.is_none() {
            return Err(ValidationError::new("id_company", "unknown company").into());
        }
        let target = CustomerCompany {
            id_customer: current.id_customer,
            id_company,
        };
        if target != current && self.repo.exists(target).await? {
            return Err(ConflictError(format!(
                "customer {} already belongs to company {}",
                target.id_customer, target.id_company
            ))
            .into());
        }
        self.repo.update(current, id_company).await
    }
}

pub struct UnlinkCustomerCompany<'a, R: CustomerCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerCompanyRepository + ?Sized> UnlinkCustomerCompany<'a, R> {
    pub async fn execute(&self, link: CustomerCompany) -> anyhow::Result<bool> {
        self.repo.delete(link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::testing::{InMemoryCompanies, InMemoryCustomerCompanies};
    use crate::domain::companies::company::NewCompany;

    async fn with_companies(n: usize) -> InMemoryCompanies {
        let companies = InMemoryCompanies::default();
        for i in 0..n {
            companies
                .create(&NewCompany {
                    company_name: format!("Company {i}"),
                    siret: format!("{:014}", i + 1),
                    address: "1 rue de la Paix".into(),
                    postal_code: "75002".into(),
                    city: "Paris".into(),
                    phone: None,
                    email: None,
                })
                .await
                .unwrap();
        }
        companies
    }

    fn link(id_customer: i32, id_company: i32) -> CustomerCompany {
        CustomerCompany {
            id_customer,
            id_company,
        }
    }

    #[tokio::test]
    async fn duplicate_link_is_a_conflict() {
        let repo = InMemoryCustomerCompanies::default();
        let companies = with_companies(1).await;
        let uc = LinkCustomerCompany {
            repo: &repo,
            companies: &companies,
        };

        uc.execute(link(4, 1)).await.unwrap();
        let err = uc.execute(link(4, 1)).await.unwrap_err();
        assert!(err.downcast_ref::<ConflictError>().is_some());
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_company_is_rejected() {
        let repo = InMemoryCustomerCompanies::default();
        let companies = with_companies(0).await;
        let uc = LinkCustomerCompany {
            repo: &repo,
            companies: &companies,
        };
        let err = uc.execute(link(4, 9)).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>().unwrap().field,
            "id_company"
        );
    }

    #[tokio::test]
    async fn move_refuses_to_collide_with_existing_link() {
        let repo = InMemoryCustomerCompanies::default();
        let companies = with_companies(3).await;
        repo.create(link(4, 1)).await.unwrap();
        repo.create(link(4, 2)).await.unwrap();
        let uc = MoveCustomerCompany {
            repo: &repo,
            companies: &companies,
        };

        let err = uc.execute(link(4, 1), 2).await.unwrap_err();
        assert!(err.downcast_ref::<ConflictError>().is_some());

        let moved = uc.execute(link(4, 1), 3).await.unwrap();
        assert_eq!(moved, Some(link(4, 3)));
        assert_eq!(
            ListCustomerCompanies { repo: &repo }
                .execute(Some(4))
                .await
                .unwrap(),
            vec![link(4, 3), link(4, 2)]
        );
    }
}
