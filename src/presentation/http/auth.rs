use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::Actor;
use crate::application::use_cases::auth::login::{
    AuthenticatedCustomer, Login as LoginUc, LoginRequest as LoginDto,
};
use crate::application::use_cases::auth::me::GetMe;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::customers::CustomerResponse;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginCustomer {
    pub id_customer: i32,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub customer: LoginCustomer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id_customer: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let customers = ctx.customer_repo();
    let login_logs = ctx.login_log_repo();
    let uc = LoginUc {
        customers: customers.as_ref(),
        login_logs: login_logs.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
        ip_address: client_ip(&headers),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    let customer = uc.execute(&dto).await?.ok_or(ApiError::Unauthorized)?;
    let token = issue_token(&ctx.cfg, &customer)?;

    let mut out = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, secure_cookies(&ctx.cfg));
    out.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).unwrap_or(HeaderValue::from_static("")),
    );
    Ok((
        out,
        Json(LoginResponse {
            access_token: token,
            token_type: "bearer",
            customer: LoginCustomer {
                id_customer: customer.id,
                email: customer.email,
                role: customer.role,
            },
        }),
    ))
}

#[utoipa::path(get, path = "/auth/me", tag = "Auth", responses((status = 200, body = CustomerResponse)))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<CustomerResponse>, ApiError> {
    let actor = authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.customer_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let customer = uc
        .execute(actor.customer_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(customer.into()))
}

#[utoipa::path(post, path = "/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    let mut headers = HeaderMap::new();
    let cookie = if secure_cookies(&ctx.cfg) {
        "access_token=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "access_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    };
    headers.insert(header::SET_COOKIE, HeaderValue::from_static(cookie));
    (headers, StatusCode::NO_CONTENT)
}

pub(crate) fn issue_token(cfg: &Config, customer: &AuthenticatedCustomer) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: customer.id.to_string(),
        id_customer: customer.id,
        role: Some(customer.role.clone()),
        exp: now + cfg.jwt_expires_secs.max(0) as usize,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!(error = ?err, "jwt_encode_failed");
        ApiError::Internal
    })
}

// --- Bearer extractor & JWT utils ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(t) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        {
            return Ok(Bearer(t.trim().to_string()));
        }

        // HttpOnly cookie set by /auth/login
        if let Some(token) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|hdr| get_cookie(hdr, "access_token"))
        {
            return Ok(Bearer(token));
        }

        Err(ApiError::Unauthorized)
    }
}

/// Verifies the token and turns its claims into an [`Actor`].
///
/// A valid token without a role claim is refused with 403 rather than 401:
/// the caller is known but cannot be authorized.
pub fn authenticate(cfg: &Config, bearer: &Bearer) -> Result<Actor, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;
    let role = data.claims.role.ok_or(ApiError::MissingRole)?;
    Ok(Actor::new(data.claims.id_customer, role))
}

/// Same as [`authenticate`] for endpoints that also accept anonymous callers.
pub fn authenticate_optional(
    cfg: &Config,
    bearer: Option<&Bearer>,
) -> Result<Option<Actor>, ApiError> {
    bearer.map(|b| authenticate(cfg, b)).transpose()
}

// --- Cookie & header helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|part| {
        let (k, v) = part.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim().to_string())
    })
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

fn secure_cookies(cfg: &Config) -> bool {
    cfg.frontend_url
        .as_deref()
        .is_some_and(|u| u.starts_with("https://"))
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
