use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use ::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use customer_api::bootstrap::app_context::{AppContext, AppServices};
use customer_api::bootstrap::config::Config;
use customer_api::infrastructure::db::repositories::{
    address_repository_sqlx::SqlxAddressRepository,
    company_repository_sqlx::SqlxCompanyRepository,
    customer_company_repository_sqlx::SqlxCustomerCompanyRepository,
    customer_repository_sqlx::SqlxCustomerRepository,
    feedback_repository_sqlx::SqlxFeedbackRepository,
    login_log_repository_sqlx::SqlxLoginLogRepository,
    notification_repository_sqlx::SqlxNotificationRepository,
};
use customer_api::infrastructure::messaging::AmqpConnectionManager;
use customer_api::infrastructure::messaging::notification_publisher_amqp::AmqpNotificationPublisher;
use customer_api::infrastructure::messaging::remote_query_amqp::AmqpRemoteQuery;
use customer_api::presentation::http as api;

#[derive(OpenApi)]
#[openapi(
        paths(
            customer_api::presentation::http::health::root,
            customer_api::presentation::http::health::health,
            customer_api::presentation::http::auth::login,
            customer_api::presentation::http::auth::logout,
            customer_api::presentation::http::auth::me,
            customer_api::presentation::http::customers::list_customers,
            customer_api::presentation::http::customers::create_customer,
            customer_api::presentation::http::customers::get_customer,
            customer_api::presentation::http::customers::update_customer,
            customer_api::presentation::http::customers::delete_customer,
            customer_api::presentation::http::orders::list_customer_orders,
            customer_api::presentation::http::orders::list_order_products,
            customer_api::presentation::http::companies::list_companies,
            customer_api::presentation::http::companies::create_company,
            customer_api::presentation::http::companies::get_company,
            customer_api::presentation::http::companies::update_company,
            customer_api::presentation::http::companies::delete_company,
            customer_api::presentation::http::customer_companies::list_customer_companies,
            customer_api::presentation::http::customer_companies::create_customer_company,
            customer_api::presentation::http::customer_companies::get_customer_company,
            customer_api::presentation::http::customer_companies::update_customer_company,
            customer_api::presentation::http::customer_companies::delete_customer_company,
            customer_api::presentation::http::addresses::list_addresses,
            customer_api::presentation::http::addresses::create_address,
            customer_api::presentation::http::addresses::get_address,
            customer_api::presentation::http::addresses::update_address,
            customer_api::presentation::http::addresses::delete_address,
            customer_api::presentation::http::feedback::list_feedback,
            customer_api::presentation::http::feedback::create_feedback,
            customer_api::presentation::http::feedback::get_feedback,
            customer_api::presentation::http::feedback::update_feedback,
            customer_api::presentation::http::feedback::delete_feedback,
            customer_api::presentation::http::notifications::list_notifications,
            customer_api::presentation::http::notifications::create_notification,
            customer_api::presentation::http::notifications::get_notification,
            customer_api::presentation::http::notifications::update_notification,
            customer_api::presentation::http::notifications::delete_notification,
            customer_api::presentation::http::login_logs::list_login_logs,
            customer_api::presentation::http::login_logs::create_login_log,
            customer_api::presentation::http::login_logs::get_login_log,
            customer_api::presentation::http::login_logs::update_login_log,
            customer_api::presentation::http::login_logs::delete_login_log,
        ),
        components(schemas(
            customer_api::presentation::http::error::ErrorBody,
            customer_api::presentation::http::health::HealthResp,
            customer_api::presentation::http::auth::LoginRequest,
            customer_api::presentation::http::auth::LoginResponse,
            customer_api::presentation::http::auth::LoginCustomer,
            customer_api::presentation::http::customers::CustomerResponse,
            customer_api::presentation::http::customers::CreateCustomerRequest,
            customer_api::presentation::http::customers::UpdateCustomerRequest,
            customer_api::presentation::http::companies::Company,
            customer_api::presentation::http::companies::CreateCompanyRequest,
            customer_api::presentation::http::companies::UpdateCompanyRequest,
            customer_api::presentation::http::customer_companies::CustomerCompany,
            customer_api::presentation::http::customer_companies::MoveCustomerCompanyRequest,
            customer_api::presentation::http::addresses::Address,
            customer_api::presentation::http::addresses::CreateAddressRequest,
            customer_api::presentation::http::addresses::UpdateAddressRequest,
            customer_api::presentation::http::feedback::Feedback,
            customer_api::presentation::http::feedback::CreateFeedbackRequest,
            customer_api::presentation::http::feedback::UpdateFeedbackRequest,
            customer_api::presentation::http::notifications::Notification,
            customer_api::presentation::http::notifications::CreateNotificationRequest,
            customer_api::presentation::http::notifications::UpdateNotificationRequest,
            customer_api::presentation::http::login_logs::LoginLog,
            customer_api::presentation::http::login_logs::CreateLoginLogRequest,
            customer_api::presentation::http::login_logs::UpdateLoginLogRequest,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Customers", description = "Customer accounts"),
            (name = "Orders", description = "Orders and products from sibling services"),
            (name = "Companies", description = "Companies"),
            (name = "CustomerCompanies", description = "Customer to company links"),
            (name = "Addresses", description = "Customer addresses"),
            (name = "Feedback", description = "Product feedback"),
            (name = "Notifications", description = "Customer notifications"),
            (name = "LoginLogs", description = "Login history"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("customer_api=debug,axum=info,tower_http=info,lapin=warn")
        }))
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        rpc_timeout_secs = cfg.rpc_timeout.as_secs(),
        production = cfg.is_production,
        "Starting customer API"
    );

    // Database
    let pool = customer_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    customer_api::infrastructure::db::migrate(&pool).await?;

    // Broker: the connection is opened lazily on first use
    let amqp = Arc::new(AmqpConnectionManager::new(
        cfg.amqp_url.clone(),
        cfg.rpc_timeout,
    ));

    let services = AppServices::new(
        Arc::new(SqlxCustomerRepository::new(pool.clone())),
        Arc::new(SqlxCompanyRepository::new(pool.clone())),
        Arc::new(SqlxCustomerCompanyRepository::new(pool.clone())),
        Arc::new(SqlxAddressRepository::new(pool.clone())),
        Arc::new(SqlxFeedbackRepository::new(pool.clone())),
        Arc::new(SqlxNotificationRepository::new(pool.clone())),
        Arc::new(SqlxLoginLogRepository::new(pool.clone())),
        Arc::new(AmqpNotificationPublisher::new(amqp.clone(), cfg.rpc_timeout)),
        Arc::new(AmqpRemoteQuery::new(amqp.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(api::health::routes(pool.clone()))
        .merge(api::auth::routes(ctx.clone()))
        .merge(api::customers::routes(ctx.clone()))
        .merge(api::orders::routes(ctx.clone()))
        .merge(api::companies::routes(ctx.clone()))
        .merge(api::customer_companies::routes(ctx.clone()))
        .merge(api::addresses::routes(ctx.clone()))
        .merge(api::feedback::routes(ctx.clone()))
        .merge(api::notifications::routes(ctx.clone()))
        .merge(api::login_logs::routes(ctx.clone()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(?e, "API server failed");
    }

    amqp.close().await;
    pool.close().await;
    served?;
    Ok(())
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            ::http::Method::GET,
            ::http::Method::POST,
            ::http::Method::PUT,
            ::http::Method::DELETE,
            ::http::Method::OPTIONS,
        ])
        .allow_headers([::http::header::CONTENT_TYPE, ::http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // FRONTEND_URL is mandatory in production; an unparsable one denies every origin
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
