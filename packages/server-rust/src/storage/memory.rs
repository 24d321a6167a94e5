//! In-memory [`SessionStore`] and [`CustomerStore`] implementations backed
//! by [`DashMap`].
//!
//! Used by tests and by local runs without a database. Both stores count
//! their reads so callers can check how often the resolver hit them.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use storefront_core::{CustomerId, CustomerRecord};

use crate::traits::{CustomerStore, SessionStore};

/// Session blobs keyed by session identifier.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Value>,
    reads: AtomicU64,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the session blob for `session_id`.
    pub fn insert(&self, session_id: impl Into<String>, data: Value) {
        self.sessions.insert(session_id.into(), data);
    }

    /// Remove a session, as an expiry sweep or logout would.
    pub fn remove(&self, session_id: &str) -> Option<Value> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    /// Number of `load_session` calls served so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load_session(&self, session_id: &str) -> anyhow::Result<Option<Value>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.sessions.get(session_id).map(|entry| entry.value().clone()))
    }
}

/// Customer rows keyed by customer id.
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    customers: DashMap<CustomerId, CustomerRecord>,
    reads: AtomicU64,
}

impl MemoryCustomerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a customer row.
    pub fn insert(&self, record: CustomerRecord) {
        self.customers.insert(record.customer_id, record);
    }

    /// Number of `find_active_customer` calls served so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn find_active_customer(
        &self,
        customer_id: CustomerId,
    ) -> anyhow::Result<Option<CustomerRecord>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .customers
            .get(&customer_id)
            .filter(|entry| entry.status.is_active())
            .map(|entry| entry.value().clone()))
    }
}
