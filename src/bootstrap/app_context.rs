use std::sync::Arc;

use crate::application::ports::address_repository::AddressRepository;
use crate::application::ports::company_repository::CompanyRepository;
use crate::application::ports::customer_company_repository::CustomerCompanyRepository;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::login_log_repository::LoginLogRepository;
use crate::application::ports::notification_event_publisher::NotificationEventPublisher;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::remote_query_port::RemoteQueryPort;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    customer_repo: Arc<dyn CustomerRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    customer_company_repo: Arc<dyn CustomerCompanyRepository>,
    address_repo: Arc<dyn AddressRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    login_log_repo: Arc<dyn LoginLogRepository>,
    notification_events: Arc<dyn NotificationEventPublisher>,
    remote_query: Arc<dyn RemoteQueryPort>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        company_repo: Arc<dyn CompanyRepository>,
        customer_company_repo: Arc<dyn CustomerCompanyRepository>,
        address_repo: Arc<dyn AddressRepository>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        login_log_repo: Arc<dyn LoginLogRepository>,
        notification_events: Arc<dyn NotificationEventPublisher>,
        remote_query: Arc<dyn RemoteQueryPort>,
    ) -> Self {
        Self {
            customer_repo,
            company_repo,
            customer_company_repo,
            address_repo,
            feedback_repo,
            notification_repo,
            login_log_repo,
            notification_events,
            remote_query,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn customer_repo(&self) -> Arc<dyn CustomerRepository> {
        self.services.customer_repo.clone()
    }

    pub fn company_repo(&self) -> Arc<dyn CompanyRepository> {
        self.services.company_repo.clone()
    }

    pub fn customer_company_repo(&self) -> Arc<dyn CustomerCompanyRepository> {
        self.services.customer_company_repo.clone()
    }

    pub fn address_repo(&self) -> Arc<dyn AddressRepository> {
        self.services.address_repo.clone()
    }

    pub fn feedback_repo(&self) -> Arc<dyn FeedbackRepository> {
        self.services.feedback_repo.clone()
    }

    pub fn notification_repo(&self) -> Arc<dyn NotificationRepository> {
        self.services.notification_repo.clone()
    }

    pub fn login_log_repo(&self) -> Arc<dyn LoginLogRepository> {
        self.services.login_log_repo.clone()
    }

    pub fn notification_events(&self) -> Arc<dyn NotificationEventPublisher> {
        self.services.notification_events.clone()
    }

    pub fn remote_query(&self) -> Arc<dyn RemoteQueryPort> {
        self.services.remote_query.clone()
    }
}
