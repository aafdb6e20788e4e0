use chrono::{DateTime, Utc};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: i32,
    pub id_customer: i32,
    pub product_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub id_customer: i32,
    pub product_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackPatch {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}
