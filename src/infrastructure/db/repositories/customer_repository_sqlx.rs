use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::customer::{
    Customer, CustomerCredentials, CustomerPatch, NewCustomer,
};
use crate::infrastructure::db::PgPool;

const CUSTOMER_COLUMNS: &str = "id_customer, created_at, name, username, first_name, last_name, \
     phone, email, last_login, customer_type, failed_login_attempts, \
     preferred_contact_method, opt_in_marketing, loyalty_points, role";

pub struct SqlxCustomerRepository {
    pub pool: PgPool,
}

impl SqlxCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn customer_from_row(r: &PgRow) -> Customer {
    Customer {
        id: r.get("id_customer"),
        created_at: r.get("created_at"),
        name: r.get("name"),
        username: r.get("username"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        phone: r.try_get("phone").ok().flatten(),
        email: r.get("email"),
        last_login: r.try_get("last_login").ok().flatten(),
        customer_type: r.get("customer_type"),
        failed_login_attempts: r.get("failed_login_attempts"),
        preferred_contact_method: r.try_get("preferred_contact_method").ok().flatten(),
        opt_in_marketing: r.get("opt_in_marketing"),
        loyalty_points: r.get("loyalty_points"),
        role: r.get("role"),
    }
}

#[async_trait]
impl CustomerRepository for SqlxCustomerRepository {
    async fn list(&self) -> anyhow::Result<Vec<Customer>> {
        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id_customer"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(customer_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id_customer = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(customer_from_row))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<CustomerCredentials>> {
        let row = sqlx::query(
            r#"SELECT id_customer, email, role, password_hash FROM customers WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| CustomerCredentials {
            id: r.get("id_customer"),
            email: r.get("email"),
            role: r.get("role"),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn email_taken(&self, email: &str, except_id: Option<i32>) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM customers
                   WHERE email = $1 AND ($2::INT IS NULL OR id_customer <> $2)
               ) AS taken"#,
        )
        .bind(email)
        .bind(except_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("taken"))
    }

    async fn create(&self, c: &NewCustomer) -> anyhow::Result<Customer> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO customers (name, username, first_name, last_name, phone, email,
                   password_hash, customer_type, preferred_contact_method, opt_in_marketing,
                   loyalty_points, role)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING {CUSTOMER_COLUMNS}"#
        ))
        .bind(&c.name)
        .bind(&c.username)
        .bind(&c.first_name)
        .bind(&c.last_name)
        .bind(&c.phone)
        .bind(&c.email)
        .bind(&c.password_hash)
        .bind(c.customer_type)
        .bind(c.preferred_contact_method)
        .bind(c.opt_in_marketing)
        .bind(c.loyalty_points)
        .bind(&c.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(customer_from_row(&row))
    }

    async fn update(&self, id: i32, p: &CustomerPatch) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query(&format!(
            r#"UPDATE customers SET
                   name = COALESCE($2, name),
                   username = COALESCE($3, username),
                   first_name = COALESCE($4, first_name),
                   last_name = COALESCE($5, last_name),
                   phone = COALESCE($6, phone),
                   email = COALESCE($7, email),
                   password_hash = COALESCE($8, password_hash),
                   customer_type = COALESCE($9, customer_type),
                   preferred_contact_method = COALESCE($10, preferred_contact_method),
                   opt_in_marketing = COALESCE($11, opt_in_marketing),
                   loyalty_points = COALESCE($12, loyalty_points),
                   role = COALESCE($13, role)
               WHERE id_customer = $1
               RETURNING {CUSTOMER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&p.name)
        .bind(&p.username)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.phone)
        .bind(&p.email)
        .bind(&p.password_hash)
        .bind(p.customer_type)
        .bind(p.preferred_contact_method)
        .bind(p.opt_in_marketing)
        .bind(p.loyalty_points)
        .bind(&p.role)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(customer_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM customers WHERE id_customer = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn record_failed_login(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE customers SET failed_login_attempts = failed_login_attempts + 1 WHERE id_customer = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_successful_login(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE customers SET failed_login_attempts = 0, last_login = $2 WHERE id_customer = $1",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
