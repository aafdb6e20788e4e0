use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::company_repository::CompanyRepository;
use crate::domain::companies::company::{Company, CompanyPatch, NewCompany};
use crate::infrastructure::db::PgPool;

pub struct SqlxCompanyRepository {
    pub pool: PgPool,
}

impl SqlxCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn company_from_row(r: &PgRow) -> Company {
    Company {
        id: r.get("id_company"),
        company_name: r.get("company_name"),
        siret: r.get("siret"),
        address: r.get("address"),
        postal_code: r.get("postal_code"),
        city: r.get("city"),
        phone: r.try_get("phone").ok().flatten(),
        email: r.try_get("email").ok().flatten(),
    }
}

#[async_trait]
impl CompanyRepository for SqlxCompanyRepository {
    async fn list(&self) -> anyhow::Result<Vec<Company>> {
        let rows = sqlx::query(
            r#"SELECT id_company, company_name, siret, address, postal_code, city, phone, email
               FROM companies ORDER BY id_company"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(company_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Company>> {
        let row = sqlx::query(
            r#"SELECT id_company, company_name, siret, address, postal_code, city, phone, email
               FROM companies WHERE id_company = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    async fn create(&self, c: &NewCompany) -> anyhow::Result<Company> {
        let row = sqlx::query(
            r#"INSERT INTO companies (company_name, siret, address, postal_code, city, phone, email)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id_company, company_name, siret, address, postal_code, city, phone, email"#,
        )
        .bind(&c.company_name)
        .bind(&c.siret)
        .bind(&c.address)
        .bind(&c.postal_code)
        .bind(&c.city)
        .bind(&c.phone)
        .bind(&c.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(company_from_row(&row))
    }

    async fn update(&self, id: i32, p: &CompanyPatch) -> anyhow::Result<Option<Company>> {
        let row = sqlx::query(
            r#"UPDATE companies SET
                   company_name = COALESCE($2, company_name),
                   siret = COALESCE($3, siret),
                   address = COALESCE($4, address),
                   postal_code = COALESCE($5, postal_code),
                   city = COALESCE($6, city),
                   phone = COALESCE($7, phone),
                   email = COALESCE($8, email)
               WHERE id_company = $1
               RETURNING id_company, company_name, siret, address, postal_code, city, phone, email"#,
        )
        .bind(id)
        .bind(&p.company_name)
        .bind(&p.siret)
        .bind(&p.address)
        .bind(&p.postal_code)
        .bind(&p.city)
        .bind(&p.phone)
        .bind(&p.email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM companies WHERE id_company = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
