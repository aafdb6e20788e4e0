use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::{self, AccessError};
use crate::application::use_cases::customers::manage_customers::{
    DeleteCustomer, GetCustomer, ListCustomers,
};
use crate::application::use_cases::customers::register_customer::{
    RegisterCustomer, RegisterCustomerRequest,
};
use crate::application::use_cases::customers::update_customer::{
    UpdateCustomer, UpdateCustomerRequest as UpdateDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::customer::{Customer, ROLE_CUSTOMER};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

/// Customer as exposed over HTTP. The password hash never leaves the service.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id_customer: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub customer_type: i32,
    pub failed_login_attempts: i32,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: bool,
    pub loyalty_points: i32,
    pub role: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id_customer: c.id,
            created_at: c.created_at,
            name: c.name,
            username: c.username,
            first_name: c.first_name,
            last_name: c.last_name,
            phone: c.phone,
            email: c.email,
            last_login: c.last_login,
            customer_type: c.customer_type,
            failed_login_attempts: c.failed_login_attempts,
            preferred_contact_method: c.preferred_contact_method,
            opt_in_marketing: c.opt_in_marketing,
            loyalty_points: c.loyalty_points,
            role: c.role,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub customer_type: i32,
    pub preferred_contact_method: Option<i32>,
    #[serde(default)]
    pub opt_in_marketing: bool,
    #[serde(default)]
    pub loyalty_points: i32,
    /// Only administrators may set this; defaults to `customer`.
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub customer_type: Option<i32>,
    pub preferred_contact_method: Option<i32>,
    pub opt_in_marketing: Option<bool>,
    pub loyalty_points: Option<i32>,
    pub role: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:id",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/customers", tag = "Customers", responses((status = 200, body = [CustomerResponse])))]
pub async fn list_customers(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.customer_repo();
    let uc = ListCustomers {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/customers", tag = "Customers", request_body = CreateCustomerRequest, security(()), responses(
    (status = 201, body = CustomerResponse),
    (status = 409, body = crate::presentation::http::error::ErrorBody),
    (status = 422, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_customer(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let actor = auth::authenticate_optional(&ctx.cfg, bearer.as_ref())?;
    let role = match req.role {
        Some(role) if role != ROLE_CUSTOMER => {
            let actor = actor.ok_or(ApiError::Forbidden(AccessError::AdminRequired))?;
            access::require_admin(&actor)?;
            role
        }
        _ => ROLE_CUSTOMER.to_string(),
    };
    let repo = ctx.customer_repo();
    let uc = RegisterCustomer {
        repo: repo.as_ref(),
    };
    let dto = RegisterCustomerRequest {
        name: req.name,
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        email: req.email,
        password: req.password,
        customer_type: req.customer_type,
        preferred_contact_method: req.preferred_contact_method,
        opt_in_marketing: req.opt_in_marketing,
        loyalty_points: req.loyalty_points,
        role,
    };
    let created = uc.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/customers/{id}", tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 200, body = CustomerResponse)))]
pub async fn get_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id)?;
    let repo = ctx.customer_repo();
    let uc = GetCustomer {
        repo: repo.as_ref(),
    };
    let customer = uc.execute(id).await?.ok_or(ApiError::NotFound("customer"))?;
    Ok(Json(customer.into()))
}

#[utoipa::path(put, path = "/customers/{id}", tag = "Customers", request_body = UpdateCustomerRequest,
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 200, body = CustomerResponse)))]
pub async fn update_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id)?;
    if req.role.is_some() {
        access::require_admin(&actor)?;
    }
    let repo = ctx.customer_repo();
    let uc = UpdateCustomer {
        repo: repo.as_ref(),
    };
    let dto = UpdateDto {
        name: req.name,
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        email: req.email,
        password: req.password,
        customer_type: req.customer_type,
        preferred_contact_method: req.preferred_contact_method,
        opt_in_marketing: req.opt_in_marketing,
        loyalty_points: req.loyalty_points,
        role: req.role,
    };
    let updated = uc
        .execute(id, &dto)
        .await?
        .ok_or(ApiError::NotFound("customer"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/customers/{id}", tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 204)))]
pub async fn delete_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id)?;
    let repo = ctx.customer_repo();
    let uc = DeleteCustomer {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("customer"))
    }
}
