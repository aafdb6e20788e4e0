use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::address_repository::AddressRepository;
use crate::domain::customers::address::{Address, AddressPatch, NewAddress};
use crate::infrastructure::db::PgPool;

const ADDRESS_COLUMNS: &str = "id_address, id_customer, address_line1, address_line2, city, \
     state, postal_code, country, address_type, created_at, updated_at";

pub struct SqlxAddressRepository {
    pub pool: PgPool,
}

impl SqlxAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn address_from_row(r: &PgRow) -> Address {
    Address {
        id: r.get("id_address"),
        id_customer: r.get("id_customer"),
        address_line1: r.get("address_line1"),
        address_line2: r.try_get("address_line2").ok().flatten(),
        city: r.get("city"),
        state: r.try_get("state").ok().flatten(),
        postal_code: r.get("postal_code"),
        country: r.get("country"),
        address_type: r.get("address_type"),
        created_at: r.get("created_at"),
        updated_at: r.try_get("updated_at").ok().flatten(),
    }
}

#[async_trait]
impl AddressRepository for SqlxAddressRepository {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Address>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {ADDRESS_COLUMNS} FROM addresses
               WHERE ($1::INT IS NULL OR id_customer = $1)
               ORDER BY id_address"#
        ))
        .bind(id_customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(address_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Address>> {
        let row = sqlx::query(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id_address = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(address_from_row))
    }

    async fn create(&self, a: &NewAddress) -> anyhow::Result<Address> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO addresses (id_customer, address_line1, address_line2, city, state,
                   postal_code, country, address_type)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {ADDRESS_COLUMNS}"#
        ))
        .bind(a.id_customer)
        .bind(&a.address_line1)
        .bind(&a.address_line2)
        .bind(&a.city)
        .bind(&a.state)
        .bind(&a.postal_code)
        .bind(&a.country)
        .bind(a.address_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(address_from_row(&row))
    }

    async fn update(&self, id: i32, p: &AddressPatch) -> anyhow::Result<Option<Address>> {
        let row = sqlx::query(&format!(
            r#"UPDATE addresses SET
                   address_line1 = COALESCE($2, address_line1),
                   address_line2 = COALESCE($3, address_line2),
                   city = COALESCE($4, city),
                   state = COALESCE($5, state),
                   postal_code = COALESCE($6, postal_code),
                   country = COALESCE($7, country),
                   address_type = COALESCE($8, address_type),
                   updated_at = now()
               WHERE id_address = $1
               RETURNING {ADDRESS_COLUMNS}"#
        ))
        .bind(id)
        .bind(&p.address_line1)
        .bind(&p.address_line2)
        .bind(&p.city)
        .bind(&p.state)
        .bind(&p.postal_code)
        .bind(&p.country)
        .bind(p.address_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(address_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM addresses WHERE id_address = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
