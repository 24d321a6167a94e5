use async_trait::async_trait;
use storefront_core::{CustomerId, CustomerRecord};

/// Read access to server-side session records.
///
/// Implementations: `PostgreSQL` session table, memory (tests, local runs).
/// Expiry is the store's business: an expired session reads as `None`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the raw session blob for a session identifier.
    async fn load_session(&self, session_id: &str) -> anyhow::Result<Option<serde_json::Value>>;
}

/// Read access to persisted customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Load the customer with the given id, only if its status is active.
    async fn find_active_customer(
        &self,
        customer_id: CustomerId,
    ) -> anyhow::Result<Option<CustomerRecord>>;
}
