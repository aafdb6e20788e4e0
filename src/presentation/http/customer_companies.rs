use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access;
use crate::application::use_cases::customer_companies::manage_links::{
    GetCustomerCompany, LinkCustomerCompany, ListCustomerCompanies, MoveCustomerCompany,
    UnlinkCustomerCompany,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::companies::customer_company::CustomerCompany as Link;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerCompany {
    pub id_customer: i32,
    pub id_company: i32,
}

impl From<Link> for CustomerCompany {
    fn from(l: Link) -> Self {
        Self {
            id_customer: l.id_customer,
            id_company: l.id_company,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveCustomerCompanyRequest {
    pub id_company: i32,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/customer-companies",
            get(list_customer_companies).post(create_customer_company),
        )
        .route(
            "/customer-companies/:id_customer/:id_company",
            get(get_customer_company)
                .put(update_customer_company)
                .delete(delete_customer_company),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/customer-companies", tag = "CustomerCompanies",
    responses((status = 200, body = [CustomerCompany])))]
pub async fn list_customer_companies(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<CustomerCompany>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.customer_company_repo();
    let uc = ListCustomerCompanies {
        repo: repo.as_ref(),
    };
    let items = uc.execute(access::listing_scope(&actor)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/customer-companies/{id_customer}/{id_company}", tag = "CustomerCompanies",
    params(
        ("id_customer" = i32, Path, description = "Customer ID"),
        ("id_company" = i32, Path, description = "Company ID")
    ),
    responses((status = 200, body = CustomerCompany)))]
pub async fn get_customer_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id_customer, id_company)): Path<(i32, i32)>,
) -> Result<Json<CustomerCompany>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id_customer)?;
    let repo = ctx.customer_company_repo();
    let uc = GetCustomerCompany {
        repo: repo.as_ref(),
    };
    let link = uc
        .execute(Link {
            id_customer,
            id_company,
        })
        .await?
        .ok_or(ApiError::NotFound("customer company link"))?;
    Ok(Json(link.into()))
}

#[utoipa::path(post, path = "/customer-companies", tag = "CustomerCompanies", request_body = CustomerCompany,
    responses((status = 201, body = CustomerCompany)))]
pub async fn create_customer_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CustomerCompany>,
) -> Result<(StatusCode, Json<CustomerCompany>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, req.id_customer)?;
    let repo = ctx.customer_company_repo();
    let companies = ctx.company_repo();
    let uc = LinkCustomerCompany {
        repo: repo.as_ref(),
        companies: companies.as_ref(),
    };
    let created = uc
        .execute(Link {
            id_customer: req.id_customer,
            id_company: req.id_company,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/customer-companies/{id_customer}/{id_company}", tag = "CustomerCompanies",
    request_body = MoveCustomerCompanyRequest,
    params(
        ("id_customer" = i32, Path, description = "Customer ID"),
        ("id_company" = i32, Path, description = "Current company ID")
    ),
    responses((status = 200, body = CustomerCompany)))]
pub async fn update_customer_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id_customer, id_company)): Path<(i32, i32)>,
    Json(req): Json<MoveCustomerCompanyRequest>,
) -> Result<Json<CustomerCompany>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id_customer)?;
    let repo = ctx.customer_company_repo();
    let companies = ctx.company_repo();
    let uc = MoveCustomerCompany {
        repo: repo.as_ref(),
        companies: companies.as_ref(),
    };
    let current = Link {
        id_customer,
        id_company,
    };
    let moved = uc
        .execute(current, req.id_company)
        .await?
        .ok_or(ApiError::NotFound("customer company link"))?;
    Ok(Json(moved.into()))
}

#[utoipa::path(delete, path = "/customer-companies/{id_customer}/{id_company}", tag = "CustomerCompanies",
    params(
        ("id_customer" = i32, Path, description = "Customer ID"),
        ("id_company" = i32, Path, description = "Company ID")
    ),
    responses((status = 204)))]
pub async fn delete_customer_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id_customer, id_company)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id_customer)?;
    let repo = ctx.customer_company_repo();
    let uc = UnlinkCustomerCompany {
        repo: repo.as_ref(),
    };
    let link = Link {
        id_customer,
        id_company,
    };
    if uc.execute(link).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("customer company link"))
    }
}
