use async_trait::async_trait;

use crate::domain::customers::feedback::{Feedback, FeedbackPatch, NewFeedback};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Feedback>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Feedback>>;
    async fn create(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback>;
    async fn update(&self, id: i32, patch: &FeedbackPatch) -> anyhow::Result<Option<Feedback>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
