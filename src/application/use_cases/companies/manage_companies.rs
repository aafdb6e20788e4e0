use crate::application::ports::company_repository::CompanyRepository;
use crate::application::validation::{self, ValidationError};
use crate::domain::companies::company::{Company, CompanyPatch, NewCompany};

fn validate_new(company: &NewCompany) -> Result<(), ValidationError> {
    validation::non_empty("company_name", &company.company_name)?;
    validation::siret(&company.siret)?;
    validation::non_empty("address", &company.address)?;
    validation::postal_code(&company.postal_code)?;
    validation::non_empty("city", &company.city)?;
    if let Some(email) = &company.email {
        validation::email("email", email)?;
    }
    Ok(())
}

fn validate_patch(patch: &CompanyPatch) -> Result<(), ValidationError> {
    if let Some(v) = &patch.company_name {
        validation::non_empty("company_name", v)?;
    }
    if let Some(v) = &patch.siret {
        validation::siret(v)?;
    }
    if let Some(v) = &patch.address {
        validation::non_empty("address", v)?;
    }
    if let Some(v) = &patch.postal_code {
        validation::postal_code(v)?;
    }
    if let Some(v) = &patch.city {
        validation::non_empty("city", v)?;
    }
    if let Some(v) = &patch.email {
        validation::email("email", v)?;
    }
    Ok(())
}

pub struct ListCompanies<'a, R: CompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CompanyRepository + ?Sized> ListCompanies<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Company>> {
        self.repo.list().await
    }
}

pub struct GetCompany<'a, R: CompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CompanyRepository + ?Sized> GetCompany<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Company>> {
        self.repo.find_by_id(id).await
    }
}

pub struct CreateCompany<'a, R: CompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CompanyRepository + ?Sized> CreateCompany<'a, R> {
    pub async fn execute(&self, company: &NewCompany) -> anyhow::Result<Company> {
        validate_new(company)?;
        self.repo.create(company).await
    }
}

pub struct UpdateCompany<'a, R: CompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CompanyRepository + ?Sized> UpdateCompany<'a, R> {
    pub async fn execute(&self, id: i32, patch: &CompanyPatch) -> anyhow::Result<Option<Company>> {
        validate_patch(patch)?;
        self.repo.update(id, patch).await
    }
}

pub struct DeleteCompany<'a, R: CompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CompanyRepository + ?Sized> DeleteCompany<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::testing::InMemoryCompanies;

    fn acme() -> NewCompany {
        NewCompany {
            company_name: "Acme".into(),
            siret: "73282932000074".into(),
            address: "1 rue de la Paix".into(),
            postal_code: "75002".into(),
            city: "Paris".into(),
            phone: None,
            email: Some("contact@acme.test".into()),
        }
    }

    #[tokio::test]
    async fn creates_valid_company() {
        let repo = InMemoryCompanies::default();
        let created = CreateCompany { repo: &repo }.execute(&acme()).await.unwrap();
        assert_eq!(created.company_name, "Acme");
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bad_siret_is_rejected_before_storage() {
        let repo = InMemoryCompanies::default();
        let mut company = acme();
        company.siret = "123".into();
        let err = CreateCompany { repo: &repo }
            .execute(&company)
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>().unwrap().field, "siret");
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_is_validated() {
        let repo = InMemoryCompanies::default();
        let created = CreateCompany { repo: &repo }.execute(&acme()).await.unwrap();
        let uc = UpdateCompany { repo: &repo };

        let bad = CompanyPatch {
            company_name: Some("  ".into()),
            ..Default::default()
        };
        assert!(uc.execute(created.id, &bad).await.is_err());

        let good = CompanyPatch {
            company_name: Some("Acme SAS".into()),
            ..Default::default()
        };
        let updated = uc.execute(created.id, &good).await.unwrap().unwrap();
        assert_eq!(updated.company_name, "Acme SAS");
    }
}
