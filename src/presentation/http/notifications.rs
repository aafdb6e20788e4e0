use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::{self, Actor};
use crate::application::use_cases::notifications::manage_notifications::{
    CreateNotification, DeleteNotification, GetNotification, ListNotifications,
    UpdateNotification,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::notification::{
    self as domain, NewNotification, NotificationPatch,
};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Notification {
    pub id_notification: i32,
    pub id_customer: i32,
    pub message: String,
    pub date_created: chrono::DateTime<chrono::Utc>,
    pub is_read: bool,
    pub r#type: i32,
}

impl From<domain::Notification> for Notification {
    fn from(n: domain::Notification) -> Self {
        Self {
            id_notification: n.id,
            id_customer: n.id_customer,
            message: n.message,
            date_created: n.date_created,
            is_read: n.is_read,
            r#type: n.notification_type,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    pub id_customer: i32,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub r#type: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateNotificationRequest {
    pub message: Option<String>,
    pub is_read: Option<bool>,
    pub r#type: Option<i32>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notifications", get(list_notifications).post(create_notification))
        .route(
            "/notifications/:id",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .with_state(ctx)
}

async fn load_owned(
    ctx: &AppContext,
    actor: &Actor,
    id: i32,
) -> Result<domain::Notification, ApiError> {
    let repo = ctx.notification_repo();
    let uc = GetNotification {
        repo: repo.as_ref(),
    };
    let notification = uc
        .execute(id)
        .await?
        .ok_or(ApiError::NotFound("notification"))?;
    access::require_owner_or_admin(actor, notification.id_customer)?;
    Ok(notification)
}

#[utoipa::path(get, path = "/notifications", tag = "Notifications", responses((status = 200, body = [Notification])))]
pub async fn list_notifications(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.notification_repo();
    let uc = ListNotifications {
        repo: repo.as_ref(),
    };
    let items = uc.execute(access::listing_scope(&actor)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/notifications/{id}", tag = "Notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    responses((status = 200, body = Notification)))]
pub async fn get_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<Notification>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    Ok(Json(load_owned(&ctx, &actor, id).await?.into()))
}

#[utoipa::path(post, path = "/notifications", tag = "Notifications", request_body = CreateNotificationRequest,
    responses((status = 201, body = Notification)))]
pub async fn create_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.notification_repo();
    let events = ctx.notification_events();
    let uc = CreateNotification {
        repo: repo.as_ref(),
        events: events.as_ref(),
    };
    let notification = NewNotification {
        id_customer: req.id_customer,
        message: req.message,
        is_read: req.is_read,
        notification_type: req.r#type,
    };
    let created = uc.execute(&notification).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/notifications/{id}", tag = "Notifications", request_body = UpdateNotificationRequest,
    params(("id" = i32, Path, description = "Notification ID")),
    responses((status = 200, body = Notification)))]
pub async fn update_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateNotificationRequest>,
) -> Result<Json<Notification>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    // owners may only flip the read flag
    if req.message.is_some() || req.r#type.is_some() {
        access::require_admin(&actor)?;
    }
    let repo = ctx.notification_repo();
    let uc = UpdateNotification {
        repo: repo.as_ref(),
    };
    let patch = NotificationPatch {
        message: req.message,
        is_read: req.is_read,
        notification_type: req.r#type,
    };
    let updated = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound("notification"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/notifications/{id}", tag = "Notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    responses((status = 204)))]
pub async fn delete_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    let repo = ctx.notification_repo();
    let uc = DeleteNotification {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("notification"))
    }
}
