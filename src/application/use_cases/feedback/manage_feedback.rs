use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::validation;
use crate::domain::customers::feedback::{Feedback, FeedbackPatch, NewFeedback};

pub struct ListFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> ListFeedback<'a, R> {
    pub async fn execute(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Feedback>> {
        self.repo.list(id_customer).await
    }
}

pub struct GetFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> GetFeedback<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<Option<Feedback>> {
        self.repo.find_by_id(id).await
    }
}

pub struct CreateFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> CreateFeedback<'a, R> {
    pub async fn execute(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback> {
        validation::rating(feedback.rating)?;
        self.repo.create(feedback).await
    }
}

pub struct UpdateFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> UpdateFeedback<'a, R> {
    pub async fn execute(&self, id: i32, patch: &FeedbackPatch) -> anyhow::Result<Option<Feedback>> {
        validation::rating(patch.rating)?;
        self.repo.update(id, patch).await
    }
}

pub struct DeleteFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> DeleteFeedback<'a, R> {
    pub async fn execute(&self, id: i32) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
