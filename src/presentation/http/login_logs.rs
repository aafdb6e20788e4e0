use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access;
use crate::application::use_cases::login_logs::manage_login_logs::{
    CreateLoginLog, DeleteLoginLog, GetLoginLog, ListLoginLogs, UpdateLoginLog,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::login_log::{self as domain, LoginLogPatch, NewLoginLog};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginLog {
    pub id_log: i32,
    pub id_customer: i32,
    pub login_time: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<domain::LoginLog> for LoginLog {
    fn from(l: domain::LoginLog) -> Self {
        Self {
            id_log: l.id,
            id_customer: l.id_customer,
            login_time: l.login_time,
            ip_address: l.ip_address,
            user_agent: l.user_agent,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoginLogRequest {
    pub id_customer: i32,
    pub login_time: Option<chrono::DateTime<chrono::Utc>>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateLoginLogRequest {
    pub login_time: Option<chrono::DateTime<chrono::Utc>>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/login-logs", get(list_login_logs).post(create_login_log))
        .route(
            "/login-logs/:id",
            get(get_login_log)
                .put(update_login_log)
                .delete(delete_login_log),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/login-logs", tag = "LoginLogs", responses((status = 200, body = [LoginLog])))]
pub async fn list_login_logs(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<LoginLog>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.login_log_repo();
    let uc = ListLoginLogs {
        repo: repo.as_ref(),
    };
    let items = uc.execute(access::listing_scope(&actor)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/login-logs/{id}", tag = "LoginLogs",
    params(("id" = i32, Path, description = "Login log ID")),
    responses((status = 200, body = LoginLog)))]
pub async fn get_login_log(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<LoginLog>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.login_log_repo();
    let uc = GetLoginLog {
        repo: repo.as_ref(),
    };
    let log = uc.execute(id).await?.ok_or(ApiError::NotFound("login log"))?;
    access::require_owner_or_admin(&actor, log.id_customer)?;
    Ok(Json(log.into()))
}

#[utoipa::path(post, path = "/login-logs", tag = "LoginLogs", request_body = CreateLoginLogRequest,
    responses((status = 201, body = LoginLog)))]
pub async fn create_login_log(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateLoginLogRequest>,
) -> Result<(StatusCode, Json<LoginLog>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.login_log_repo();
    let uc = CreateLoginLog {
        repo: repo.as_ref(),
    };
    let log = NewLoginLog {
        id_customer: req.id_customer,
        login_time: req.login_time.unwrap_or_else(chrono::Utc::now),
        ip_address: req.ip_address,
        user_agent: req.user_agent,
    };
    let created = uc.execute(&log).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/login-logs/{id}", tag = "LoginLogs", request_body = UpdateLoginLogRequest,
    params(("id" = i32, Path, description = "Login log ID")),
    responses((status = 200, body = LoginLog)))]
pub async fn update_login_log(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateLoginLogRequest>,
) -> Result<Json<LoginLog>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.login_log_repo();
    let uc = UpdateLoginLog {
        repo: repo.as_ref(),
    };
    let patch = LoginLogPatch {
        login_time: req.login_time,
        ip_address: req.ip_address,
        user_agent: req.user_agent,
    };
    let updated = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound("login log"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/login-logs/{id}", tag = "LoginLogs",
    params(("id" = i32, Path, description = "Login log ID")),
    responses((status = 204)))]
pub async fn delete_login_log(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.login_log_repo();
    let uc = DeleteLoginLog {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("login log"))
    }
}
