use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access;
use crate::application::use_cases::companies::manage_companies::{
    CreateCompany, DeleteCompany, GetCompany, ListCompanies, UpdateCompany,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::companies::company::{self as domain, CompanyPatch, NewCompany};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Company {
    pub id_company: i32,
    pub company_name: String,
    pub siret: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<domain::Company> for Company {
    fn from(c: domain::Company) -> Self {
        Self {
            id_company: c.id,
            company_name: c.company_name,
            siret: c.siret,
            address: c.address,
            postal_code: c.postal_code,
            city: c.city,
            phone: c.phone,
            email: c.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    pub company_name: String,
    pub siret: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    pub company_name: Option<String>,
    pub siret: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/companies", tag = "Companies", responses((status = 200, body = [Company])))]
pub async fn list_companies(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<Company>>, ApiError> {
    auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.company_repo();
    let uc = ListCompanies {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/companies/{id}", tag = "Companies",
    params(("id" = i32, Path, description = "Company ID")),
    responses((status = 200, body = Company)))]
pub async fn get_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<Company>, ApiError> {
    auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.company_repo();
    let uc = GetCompany {
        repo: repo.as_ref(),
    };
    let company = uc.execute(id).await?.ok_or(ApiError::NotFound("company"))?;
    Ok(Json(company.into()))
}

#[utoipa::path(post, path = "/companies", tag = "Companies", request_body = CreateCompanyRequest,
    responses((status = 201, body = Company)))]
pub async fn create_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.company_repo();
    let uc = CreateCompany {
        repo: repo.as_ref(),
    };
    let company = NewCompany {
        company_name: req.company_name,
        siret: req.siret,
        address: req.address,
        postal_code: req.postal_code,
        city: req.city,
        phone: req.phone,
        email: req.email,
    };
    let created = uc.execute(&company).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/companies/{id}", tag = "Companies", request_body = UpdateCompanyRequest,
    params(("id" = i32, Path, description = "Company ID")),
    responses((status = 200, body = Company)))]
pub async fn update_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.company_repo();
    let uc = UpdateCompany {
        repo: repo.as_ref(),
    };
    let patch = CompanyPatch {
        company_name: req.company_name,
        siret: req.siret,
        address: req.address,
        postal_code: req.postal_code,
        city: req.city,
        phone: req.phone,
        email: req.email,
    };
    let updated = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound("company"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/companies/{id}", tag = "Companies",
    params(("id" = i32, Path, description = "Company ID")),
    responses((status = 204)))]
pub async fn delete_company(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_admin(&actor)?;
    let repo = ctx.company_repo();
    let uc = DeleteCompany {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("company"))
    }
}
