use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::customer_company_repository::CustomerCompanyRepository;
use crate::domain::companies::customer_company::CustomerCompany;
use crate::infrastructure::db::PgPool;

pub struct SqlxCustomerCompanyRepository {
    pub pool: PgPool,
}

impl SqlxCustomerCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerCompanyRepository for SqlxCustomerCompanyRepository {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<CustomerCompany>> {
        let rows = sqlx::query(
            r#"SELECT id_customer, id_company FROM customer_companies
               WHERE ($1::INT IS NULL OR id_customer = $1)
               ORDER BY id_customer, id_company"#,
        )
        .bind(id_customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| CustomerCompany {
                id_customer: r.get("id_customer"),
                id_company: r.get("id_company"),
            })
            .collect())
    }

    async fn exists(&self, link: CustomerCompany) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM customer_companies WHERE id_customer = $1 AND id_company = $2
               ) AS found"#,
        )
        .bind(link.id_customer)
        .bind(link.id_company)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("found"))
    }

    async fn create(&self, link: CustomerCompany) -> anyhow::Result<CustomerCompany> {
        sqlx::query("INSERT INTO customer_companies (id_customer, id_company) VALUES ($1, $2)")
            .bind(link.id_customer)
            .bind(link.id_company)
            .execute(&self.pool)
            .await?;
        Ok(link)
    }

    async fn update(
        &self,
        current: CustomerCompany,
        id_company: i32,
    ) -> anyhow::Result<Option<CustomerCompany>> {
        let res = sqlx::query(
            r#"UPDATE customer_companies SET id_company = $3
               WHERE id_customer = $1 AND id_company = $2"#,
        )
        .bind(current.id_customer)
        .bind(current.id_company)
        .bind(id_company)
        .execute(&self.pool)
        .await?;
        Ok((res.rows_affected() > 0).then_some(CustomerCompany {
            id_customer: current.id_customer,
            id_company,
        }))
    }

    async fn delete(&self, link: CustomerCompany) -> anyhow::Result<bool> {
        let res =
            sqlx::query("DELETE FROM customer_companies WHERE id_customer = $1 AND id_company = $2")
                .bind(link.id_customer)
                .bind(link.id_company)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected() > 0)
    }
}
