use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use crate::application::access;
use crate::application::use_cases::orders::fetch_customer_orders::FetchCustomerOrders;
use crate::application::use_cases::orders::fetch_order_products::FetchOrderProducts;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/customers/:id/orders", get(list_customer_orders))
        .route(
            "/customers/:id/orders/:order_id/products",
            get(list_order_products),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/customers/{id}/orders", tag = "Orders",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Orders as returned by the order service"),
        (status = 504, body = crate::presentation::http::error::ErrorBody),
        (status = 500, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn list_customer_orders(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id)?;
    let remote = ctx.remote_query();
    let uc = FetchCustomerOrders {
        remote: remote.as_ref(),
        timeout: ctx.cfg.rpc_timeout,
    };
    Ok(Json(uc.execute(id).await?))
}

#[utoipa::path(get, path = "/customers/{id}/orders/{order_id}/products", tag = "Orders",
    params(
        ("id" = i32, Path, description = "Customer ID"),
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Product details from the product service"),
        (status = 504, body = crate::presentation::http::error::ErrorBody),
        (status = 500, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn list_order_products(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, order_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let actor = auth::authenticate(&ctx.cfg, &bearer)?;
    access::require_owner_or_admin(&actor, id)?;
    let remote = ctx.remote_query();
    let uc = FetchOrderProducts {
        remote: remote.as_ref(),
        timeout: ctx.cfg.rpc_timeout,
    };
    Ok(Json(uc.execute(id, order_id).await?))
}
