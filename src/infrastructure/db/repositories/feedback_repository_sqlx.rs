use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::domain::customers::feedback::{Feedback, FeedbackPatch, NewFeedback};
use crate::infrastructure::db::PgPool;

pub struct SqlxFeedbackRepository {
    pub pool: PgPool,
}

impl SqlxFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn feedback_from_row(r: &PgRow) -> Feedback {
    Feedback {
        id: r.get("id_feedback"),
        id_customer: r.get("id_customer"),
        product_id: r.get("product_id"),
        rating: r.try_get("rating").ok().flatten(),
        comment: r.try_get("comment").ok().flatten(),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl FeedbackRepository for SqlxFeedbackRepository {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query(
            r#"SELECT id_feedback, id_customer, product_id, rating, comment, created_at
               FROM customer_feedback
               WHERE ($1::INT IS NULL OR id_customer = $1)
               ORDER BY created_at DESC"#,
        )
        .bind(id_customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(feedback_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query(
            r#"SELECT id_feedback, id_customer, product_id, rating, comment, created_at
               FROM customer_feedback WHERE id_feedback = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(feedback_from_row))
    }

    async fn create(&self, f: &NewFeedback) -> anyhow::Result<Feedback> {
        let row = sqlx::query(
            r#"INSERT INTO customer_feedback (id_customer, product_id, rating, comment)
               VALUES ($1, $2, $3, $4)
               RETURNING id_feedback, id_customer, product_id, rating, comment, created_at"#,
        )
        .bind(f.id_customer)
        .bind(f.product_id)
        .bind(f.rating)
        .bind(&f.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(feedback_from_row(&row))
    }

    async fn update(&self, id: i32, p: &FeedbackPatch) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query(
            r#"UPDATE customer_feedback SET
                   rating = COALESCE($2, rating),
                   comment = COALESCE($3, comment)
               WHERE id_feedback = $1
               RETURNING id_feedback, id_customer, product_id, rating, comment, created_at"#,
        )
        .bind(id)
        .bind(p.rating)
        .bind(&p.comment)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(feedback_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM customer_feedback WHERE id_feedback = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
