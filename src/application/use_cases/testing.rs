//! In-memory port implementations shared by use-case tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::application::ports::company_repository::CompanyRepository;
use crate::application::ports::customer_company_repository::CustomerCompanyRepository;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::login_log_repository::LoginLogRepository;
use crate::application::ports::notification_event_publisher::{
    NotificationCreatedEvent, NotificationEventPublisher,
};
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::remote_query_port::{RemoteCallError, RemoteQueryPort};
use crate::domain::companies::company::{Company, CompanyPatch, NewCompany};
use crate::domain::companies::customer_company::CustomerCompany;
use crate::domain::customers::customer::{
    Customer, CustomerCredentials, CustomerPatch, NewCustomer,
};
use crate::domain::customers::login_log::{LoginLog, LoginLogPatch, NewLoginLog};
use crate::domain::customers::notification::{
    NewNotification, Notification, NotificationPatch,
};

#[derive(Default)]
pub struct InMemoryCustomers {
    pub rows: Mutex<Vec<(Customer, String)>>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn list(&self) -> anyhow::Result<Vec<Customer>> {
        Ok(self.rows.lock().unwrap().iter().map(|(c, _)| c.clone()).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Customer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| c.id == id)
            .map(|(c, _)| c.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<CustomerCredentials>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| c.email == email)
            .map(|(c, hash)| CustomerCredentials {
                id: c.id,
                email: c.email.clone(),
                role: c.role.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn email_taken(&self, email: &str, except_id: Option<i32>) -> anyhow::Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(c, _)| c.email == email && Some(c.id) != except_id))
    }

    async fn create(&self, new: &NewCustomer) -> anyhow::Result<Customer> {
        let mut rows = self.rows.lock().unwrap();
        let customer = Customer {
            id: rows.len() as i32 + 1,
            created_at: Utc::now(),
            name: new.name.clone(),
            username: new.username.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            last_login: None,
            customer_type: new.customer_type,
            failed_login_attempts: 0,
            preferred_contact_method: new.preferred_contact_method,
            opt_in_marketing: new.opt_in_marketing,
            loyalty_points: new.loyalty_points,
            role: new.role.clone(),
        };
        rows.push((customer.clone(), new.password_hash.clone()));
        Ok(customer)
    }

    async fn update(&self, id: i32, patch: &CustomerPatch) -> anyhow::Result<Option<Customer>> {
        let mut rows = self.rows.lock().unwrap();
        let Some((c, hash)) = rows.iter_mut().find(|(c, _)| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.name {
            c.name = v.clone();
        }
        if let Some(v) = &patch.email {
            c.email = v.clone();
        }
        if let Some(v) = &patch.role {
            c.role = v.clone();
        }
        if let Some(v) = patch.loyalty_points {
            c.loyalty_points = v;
        }
        if let Some(v) = &patch.password_hash {
            *hash = v.clone();
        }
        Ok(Some(c.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(c, _)| c.id != id);
        Ok(rows.len() != before)
    }

    async fn record_failed_login(&self, id: i32) -> anyhow::Result<()> {
        if let Some((c, _)) = self.rows.lock().unwrap().iter_mut().find(|(c, _)| c.id == id) {
            c.failed_login_attempts += 1;
        }
        Ok(())
    }

    async fn record_successful_login(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()> {
        if let Some((c, _)) = self.rows.lock().unwrap().iter_mut().find(|(c, _)| c.id == id) {
            c.failed_login_attempts = 0;
            c.last_login = Some(at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLoginLogs {
    pub rows: Mutex<Vec<LoginLog>>,
}

#[async_trait]
impl LoginLogRepository for InMemoryLoginLogs {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<LoginLog>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| id_customer.is_none_or(|id| l.id_customer == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<LoginLog>> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, log: &NewLoginLog) -> anyhow::Result<LoginLog> {
        let mut rows = self.rows.lock().unwrap();
        let row = LoginLog {
            id: rows.len() as i32 + 1,
            id_customer: log.id_customer,
            login_time: log.login_time,
            ip_address: log.ip_address.clone(),
            user_agent: log.user_agent.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: &LoginLogPatch) -> anyhow::Result<Option<LoginLog>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.login_time {
            row.login_time = v;
        }
        if let Some(v) = &patch.ip_address {
            row.ip_address = Some(v.clone());
        }
        if let Some(v) = &patch.user_agent {
            row.user_agent = Some(v.clone());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryNotifications {
    pub rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<Notification>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| id_customer.is_none_or(|id| n.id_customer == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Notification>> {
        Ok(self.rows.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn create(&self, new: &NewNotification) -> anyhow::Result<Notification> {
        let mut rows = self.rows.lock().unwrap();
        let row = Notification {
            id: rows.len() as i32 + 1,
            id_customer: new.id_customer,
            message: new.message.clone(),
            date_created: Utc::now(),
            is_read: new.is_read,
            notification_type: new.notification_type,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        patch: &NotificationPatch,
    ) -> anyhow::Result<Option<Notification>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.message {
            row.message = v.clone();
        }
        if let Some(v) = patch.is_read {
            row.is_read = v;
        }
        if let Some(v) = patch.notification_type {
            row.notification_type = v;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| n.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryCompanies {
    pub rows: Mutex<Vec<Company>>,
}

#[async_trait]
impl CompanyRepository for InMemoryCompanies {
    async fn list(&self) -> anyhow::Result<Vec<Company>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Company>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, new: &NewCompany) -> anyhow::Result<Company> {
        let mut rows = self.rows.lock().unwrap();
        let row = Company {
            id: rows.len() as i32 + 1,
            company_name: new.company_name.clone(),
            siret: new.siret.clone(),
            address: new.address.clone(),
            postal_code: new.postal_code.clone(),
            city: new.city.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: &CompanyPatch) -> anyhow::Result<Option<Company>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.company_name {
            row.company_name = v.clone();
        }
        if let Some(v) = &patch.siret {
            row.siret = v.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryCustomerCompanies {
    pub rows: Mutex<Vec<CustomerCompany>>,
}

#[async_trait]
impl CustomerCompanyRepository for InMemoryCustomerCompanies {
    async fn list(&self, id_customer: Option<i32>) -> anyhow::Result<Vec<CustomerCompany>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| id_customer.is_none_or(|id| l.id_customer == id))
            .copied()
            .collect())
    }

    async fn exists(&self, link: CustomerCompany) -> anyhow::Result<bool> {
        Ok(self.rows.lock().unwrap().contains(&link))
    }

    async fn create(&self, link: CustomerCompany) -> anyhow::Result<CustomerCompany> {
        self.rows.lock().unwrap().push(link);
        Ok(link)
    }

    async fn update(
        &self,
        current: CustomerCompany,
        id_company: i32,
    ) -> anyhow::Result<Option<CustomerCompany>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|l| **l == current) else {
            return Ok(None);
        };
        row.id_company = id_company;
        Ok(Some(*row))
    }

    async fn delete(&self, link: CustomerCompany) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| *l != link);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<NotificationCreatedEvent>>,
    pub fail: bool,
}

#[async_trait]
impl NotificationEventPublisher for RecordingPublisher {
    async fn publish(&self, event: &NotificationCreatedEvent) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("broker down");
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// One recorded `call`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub topic: String,
    pub payload: Value,
    pub expected_field: Option<String>,
    pub timeout: Duration,
}

/// Replays scripted outcomes in order and records every call.
#[derive(Default)]
pub struct ScriptedRemote {
    pub outcomes: Mutex<VecDeque<Result<Value, RemoteCallError>>>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRemote {
    pub fn with(outcomes: Vec<Result<Value, RemoteCallError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteQueryPort for ScriptedRemote {
    async fn call(
        &self,
        topic: &str,
        payload: &Value,
        expected_field: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, RemoteCallError> {
        self.calls.lock().unwrap().push(RecordedCall {
            topic: topic.to_string(),
            payload: payload.clone(),
            expected_field: expected_field.map(str::to_string),
            timeout,
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected remote call")
    }
}
