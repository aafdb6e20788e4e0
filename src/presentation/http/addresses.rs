use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::{self, Actor};
use crate::application::use_cases::addresses::manage_addresses::{
    CreateAddress, DeleteAddress, GetAddress, ListAddresses, UpdateAddress,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::address::{self as domain, AddressPatch, NewAddress};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Address {
    pub id_address: i32,
    pub id_customer: i32,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub address_type: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<domain::Address> for Address {
    fn from(a: domain::Address) -> Self {
        Self {
            id_address: a.id,
            id_customer: a.id_customer,
            address_line1: a.address_line1,
            address_line2: a.address_line2,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            address_type: a.address_type,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub id_customer: i32,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub address_type: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub address_type: Option<i32>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/:id",
            get(get_address).put(update_address).delete(delete_address),
        )
        .with_state(ctx)
}

async fn load_owned(ctx: &AppContext, actor: &Actor, id: i32) -> Result<domain::Address, ApiError> {
    let repo = ctx.address_repo();
    let uc = GetAddress {
        repo: repo.as_ref(),
    };
    let address = uc.execute(id).await?.ok_or(ApiError::NotFound("address"))?;
    access::require_owner_or_admin(actor, address.id_customer)?;
    Ok(address)
}

#[utoipa::path(get, path = "/addresses", tag = "Addresses", responses((status = 200, body = [Address])))]
pub async fn list_addresses(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<Address>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    let repo = ctx.address_repo();
    let uc = ListAddresses {
        repo: repo.as_ref(),
    };
    let items = uc.execute(access::listing_scope(&actor)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/addresses/{id}", tag = "Addresses",
    params(("id" = i32, Path, description = "Address ID")),
    responses((status = 200, body = Address)))]
pub async fn get_address(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<Address>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    Ok(Json(load_owned(&ctx, &actor, id).await?.into()))
}

#[utoipa::path(post, path = "/addresses", tag = "Addresses", request_body = CreateAddressRequest,
    responses((status = 201, body = Address)))]
pub async fn create_address(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<Address>), ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, req.id_customer)?;
    let repo = ctx.address_repo();
    let uc = CreateAddress {
        repo: repo.as_ref(),
    };
    let address = NewAddress {
        id_customer: req.id_customer,
        address_line1: req.address_line1,
        address_line2: req.address_line2,
        city: req.city,
        state: req.state,
        postal_code: req.postal_code,
        country: req.country,
        address_type: req.address_type,
    };
    let created = uc.execute(&address).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/addresses/{id}", tag = "Addresses", request_body = UpdateAddressRequest,
    params(("id" = i32, Path, description = "Address ID")),
    responses((status = 200, body = Address)))]
pub async fn update_address(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    Json(req): Json<UpdateAddressRequest>,
) -> Result<Json<Address>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    let repo = ctx.address_repo();
    let uc = UpdateAddress {
        repo: repo.as_ref(),
    };
    let patch = AddressPatch {
        address_line1: req.address_line1,
        address_line2: req.address_line2,
        city: req.city,
        state: req.state,
        postal_code: req.postal_code,
        country: req.country,
        address_type: req.address_type,
    };
    let updated = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound("address"))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/addresses/{id}", tag = "Addresses",
    params(("id" = i32, Path, description = "Address ID")),
    responses((status = 204)))]
pub async fn delete_address(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    load_owned(&ctx, &actor, id).await?;
    let repo = ctx.address_repo();
    let uc = DeleteAddress {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("address"))
    }
}
