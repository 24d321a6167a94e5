//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use chrono::Utc;
use secrecy::SecretString;
use storefront_core::{CustomerId, CustomerRecord, CustomerStatus};
use uuid::Uuid;

use crate::auth::{SessionConfig, SessionResolver};
use crate::storage::{MemoryCustomerStore, MemorySessionStore};
use crate::traits::{CustomerStore, SessionStore};

/// Memory stores wired into a resolver with a fresh signing key.
pub(crate) struct Fixture {
    pub sessions: Arc<MemorySessionStore>,
    pub customers: Arc<MemoryCustomerStore>,
    pub resolver: Arc<SessionResolver>,
}

impl Fixture {
    pub fn new() -> Self {
        let sessions = Arc::new(MemorySessionStore::new());
        let customers = Arc::new(MemoryCustomerStore::new());
        let resolver = Arc::new(SessionResolver::new(
            SessionConfig::default(),
            sessions.clone(),
            customers.clone(),
        ));
        Self {
            sessions,
            customers,
            resolver,
        }
    }

    /// `Cookie` header carrying `session_id` signed with this fixture's key.
    pub fn cookie(&self, session_id: &str) -> HeaderMap {
        let config = self.resolver.config();
        cookie_headers(&signed_cookie_pair(
            &config.key,
            &config.cookie_name,
            session_id,
        ))
    }

    /// Raw `name=value` pair for a signed session cookie.
    pub fn cookie_pair(&self, session_id: &str) -> String {
        let config = self.resolver.config();
        signed_cookie_pair(&config.key, &config.cookie_name, session_id)
    }
}

/// Signs `name=value` the same way responses set it.
pub(crate) fn signed_cookie_pair(key: &Key, name: &str, value: &str) -> String {
    let jar = SignedCookieJar::new(key.clone()).add(Cookie::new(name.to_string(), value.to_string()));
    let response = (jar, ()).into_response();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("jar sets a cookie")
        .to_str()
        .expect("cookie header is ascii");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .trim()
        .to_string()
}

pub(crate) fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(cookie).expect("valid cookie header"),
    );
    headers
}

pub(crate) fn customer_record(
    customer_id: CustomerId,
    status: CustomerStatus,
    password: &str,
) -> CustomerRecord {
    let now = Utc::now();
    CustomerRecord {
        customer_id,
        uuid: Uuid::new_v4(),
        status,
        group_id: Some(1),
        email: format!("customer{customer_id}@example.com"),
        full_name: Some(format!("Customer {customer_id}")),
        password: SecretString::from(password.to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// Session store whose backend is always down.
pub(crate) struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn load_session(&self, _session_id: &str) -> anyhow::Result<Option<serde_json::Value>> {
        Err(anyhow::anyhow!("session table unreachable"))
    }
}

/// Customer store whose backend is always down.
pub(crate) struct FailingCustomerStore;

#[async_trait]
impl CustomerStore for FailingCustomerStore {
    async fn find_active_customer(
        &self,
        _customer_id: CustomerId,
    ) -> anyhow::Result<Option<CustomerRecord>> {
        Err(anyhow::anyhow!("customer table unreachable"))
    }
}
