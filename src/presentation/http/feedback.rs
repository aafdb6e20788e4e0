use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::{self, Actor};
use crate::application::use_cases::feedback::manage_feedback::{
    CreateFeedback, DeleteFeedback, GetFeedback, ListFeedback, UpdateFeedback,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::feedback::{self as domain, FeedbackPatch, NewFeedback};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Feedback {
    pub id_feedback: i32,
    pub id_customer: i32,
    pub product_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Feedback> for Feedback {
    fn from(f: domain::Feedback) -> Self {
        Self {
            id_feedback: f.id,
            id_customer: f.id_customer,
            product_id: f.product_id,
            rating: f.rating,
            comment: f.comment,
            created_at: f.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    pub id_customer: i32,
    pub product_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFeedbackRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route(
            "/feedback/:id",
            get(get_feedback).put(update_feedback).delete(delete_feedback),
        )
        .with_state(ctx)
}

async fn load_owned(ctx: &AppContext, actor: &Actor, id: i32) -> Result<domain::Feedback, ApiError> {
    let repo = ctx.feedback_repo();
    let uc = GetFeedback {
        repo: repo.as_ref(),
    };
    let feedback = uc.execute(id).await?.ok_or(ApiError::NotFound("feedback"))?;
    access::require_owner_or_admin(actor, feedback.id_customer)?;
    Ok(feedback)
}

#[utoipa::path(get, path = "/feedback", tag = "Feedback", responses((status = 200, body = [Feedback])))]
pub async fn list_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.feedback_repo();
    let uc = ListFeedback {
        repo: repo.as_ref(),
    };
    let items = uc.execute(access::listing_scope(&actor)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/feedback/{id}", tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    responses((status = 200, body = Feedback)))]
pub async fn get_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<Feedback>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    Ok(Json(load_owned(&ctx, &actor, id).await?.into()))
}

#[utoipa::path(post, path = "/feedback", tag = "Feedback", request_body = CreateFeedbackRequest,
    responses((status = 201, body = Feedback), (status = 422, body = crate::presentation::http::error::ErrorBody)))]
pub async fn create_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, req.id_customer)?;
    let repo = ctx.feedback_repo();
    let uc = CreateFeedback {
        repo: repo.as_ref(),
    };
    let feedback = NewFeedback {
        id_customer: req.id_customer,
        product_id: req.product_id,
        rating: req.rating,
        comment: req.comment,
    };
    let created = uc.execute(&feedback).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/feedback/{id}", tag = "Feedback", request_body = UpdateFeedbackRequest,
    params(("id" = i32, Path, description = "Feedback ID")),
    responses((status = 200, body = Feedback)))]
pub async fn update_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateFeedbackRequest>,
) -> Result<Json<Feedback>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    let repo = ctx.feedback_repo();
    let uc = UpdateFeedback {
        repo: repo.as_ref(),
    };
    let patch = FeedbackPatch {
        rating: req.rating,
        comment: req.comment,
    };
    let updated = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound("feedback"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/feedback/{id}", tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    responses((status = 204)))]
pub async fn delete_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    let repo = ctx.feedback_repo();
    let uc = DeleteFeedback {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("feedback"))
    }
}
