use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::login_log_repository::LoginLogRepository;
use crate::domain::customers::login_log::{LoginLog, LoginLogPatch, NewLoginLog};
use crate::infrastructure::db::PgPool;

pub struct SqlxLoginLogRepository {
    pub pool: PgPool,
}

impl SqlxLoginLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn login_log_from_row(r: &PgRow) -> LoginLog {
    LoginLog {
        id: r.get("id_log"),
        id_customer: r.get("id_customer"),
        login_time: r.get("login_time"),
        ip_address: r.try_get("ip_address").ok().flatten(),
        user_agent: r.try_get("user_agent").ok().flatten(),
    }
}

#[async_trait]
impl LoginLogRepository for SqlxLoginLogRepository {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<LoginLog>> {
        let rows = sqlx::query(
            r#"SELECT id_log, id_customer, login_time, ip_address, user_agent
               FROM login_logs
               WHERE ($1::INT IS NULL OR id_customer = $1)
               ORDER BY login_time DESC"#,
        )
        .bind(id_customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(login_log_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<LoginLog>> {
        let row = sqlx::query(
            r#"SELECT id_log, id_customer, login_time, ip_address, user_agent
               FROM login_logs WHERE id_log = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(login_log_from_row))
    }

    async fn create(&self, l: &NewLoginLog) -> anyhow::Result<LoginLog> {
        let row = sqlx::query(
            r#"INSERT INTO login_logs (id_customer, login_time, ip_address, user_agent)
               VALUES ($1, $2, $3, $4)
               RETURNING id_log, id_customer, login_time, ip_address, user_agent"#,
        )
        .bind(l.id_customer)
        .bind(l.login_time)
        .bind(&l.ip_address)
        .bind(&l.user_agent)
        .fetch_one(&self.pool)
        .await?;
        Ok(login_log_from_row(&row))
    }

    async fn update(&self, id: i32, p: &LoginLogPatch) -> anyhow::Result<Option<LoginLog>> {
        let row = sqlx::query(
            r#"UPDATE login_logs SET
                   login_time = COALESCE($2, login_time),
                   ip_address = COALESCE($3, ip_address),
                   user_agent = COALESCE($4, user_agent)
               WHERE id_log = $1
               RETURNING id_log, id_customer, login_time, ip_address, user_agent"#,
        )
        .bind(id)
        .bind(p.login_time)
        .bind(&p.ip_address)
        .bind(&p.user_agent)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(login_log_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM login_logs WHERE id_log = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
