//! `PostgreSQL` implementations of [`SessionStore`] and [`CustomerStore`].
//!
//! Both stores share one [`PgPool`]. Sessions are read from the `session`
//! table written by the storefront's session middleware
//! (`sid`, `sess` JSON, `expire` timestamp); customers from the `customer`
//! table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use storefront_core::{CustomerId, CustomerRecord, CustomerStatus};
use uuid::Uuid;

use crate::traits::{CustomerStore, SessionStore};

/// Opens a connection pool for the given database URL.
///
/// # Errors
///
/// Returns an error if the initial connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Session reader over the `session` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load_session(&self, session_id: &str) -> anyhow::Result<Option<serde_json::Value>> {
        let row: Option<(Json<serde_json::Value>,)> =
            sqlx::query_as("SELECT sess FROM session WHERE sid = $1 AND expire >= NOW()")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(Json(sess),)| sess))
    }
}

/// Customer reader over the `customer` table.
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type CustomerRow = (
    i64,
    Uuid,
    i16,
    Option<i64>,
    String,
    Option<String>,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_active_customer(
        &self,
        customer_id: CustomerId,
    ) -> anyhow::Result<Option<CustomerRecord>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT customer_id::int8, uuid, status::int2, group_id::int8, email, full_name, \
             password, created_at, updated_at \
             FROM customer WHERE customer_id = $1 AND status = $2",
        )
        .bind(customer_id)
        .bind(CustomerStatus::ACTIVE_CODE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(
                customer_id,
                uuid,
                status,
                group_id,
                email,
                full_name,
                password,
                created_at,
                updated_at,
            )| CustomerRecord {
                customer_id,
                uuid,
                status: CustomerStatus::from(status),
                group_id,
                email,
                full_name,
                password: SecretString::from(password),
                created_at,
                updated_at,
            },
        ))
    }
}

/// Runs against a live database: `DATABASE_URL=... cargo test --features
/// postgres -- --ignored`. Each test uses a single-connection pool and
/// temporary tables, which shadow any real `session`/`customer` tables.
#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    async fn scratch_pool() -> Option<PgPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = connect(&url, 1).await.unwrap();

        sqlx::query(
            "CREATE TEMPORARY TABLE session (\
             sid varchar PRIMARY KEY, sess json NOT NULL, expire timestamp(6) NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TEMPORARY TABLE customer (\
             customer_id int PRIMARY KEY, \
             uuid uuid NOT NULL, \
             status smallint NOT NULL DEFAULT 1, \
             group_id int, \
             email varchar NOT NULL, \
             password varchar NOT NULL, \
             full_name varchar, \
             created_at timestamptz NOT NULL DEFAULT NOW(), \
             updated_at timestamptz NOT NULL DEFAULT NOW())",
        )
        .execute(&pool)
        .await
        .unwrap();

        Some(pool)
    }

    async fn insert_session(pool: &PgPool, sid: &str, sess: serde_json::Value, expire: &str) {
        sqlx::query(&format!(
            "INSERT INTO session (sid, sess, expire) VALUES ($1, $2::json, NOW() + INTERVAL '{expire}')"
        ))
        .bind(sid)
        .bind(Json(sess))
        .execute(pool)
        .await
        .unwrap();
    }

    async fn insert_customer(pool: &PgPool, customer_id: i32, uuid: Uuid, status: i16) {
        sqlx::query(
            "INSERT INTO customer (customer_id, uuid, status, group_id, email, password, full_name) \
             VALUES ($1, $2, $3, 1, $4, 'hash', 'Jane Doe')",
        )
        .bind(customer_id)
        .bind(uuid)
        .bind(status)
        .bind(format!("customer{customer_id}@example.com"))
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --features postgres -- --ignored
    async fn live_session_returns_its_blob() {
        let Some(pool) = scratch_pool().await else {
            return;
        };
        insert_session(&pool, "sess1", json!({ "customerID": 42 }), "1 hour").await;
        let store = PgSessionStore::new(pool);

        let sess = store.load_session("sess1").await.unwrap();

        assert_eq!(sess, Some(json!({ "customerID": 42 })));
        assert!(store.load_session("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --features postgres -- --ignored
    async fn expired_session_reads_as_none() {
        let Some(pool) = scratch_pool().await else {
            return;
        };
        insert_session(&pool, "old", json!({ "customerID": 42 }), "-1 hour").await;
        let store = PgSessionStore::new(pool);

        assert!(store.load_session("old").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --features postgres -- --ignored
    async fn inactive_customer_reads_as_none() {
        let Some(pool) = scratch_pool().await else {
            return;
        };
        insert_customer(&pool, 7, Uuid::new_v4(), CustomerStatus::INACTIVE_CODE).await;
        let store = PgCustomerStore::new(pool);

        assert!(store.find_active_customer(7).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --features postgres -- --ignored
    async fn active_customer_decodes_every_field() {
        let Some(pool) = scratch_pool().await else {
            return;
        };
        let uuid = Uuid::new_v4();
        insert_customer(&pool, 42, uuid, CustomerStatus::ACTIVE_CODE).await;
        let store = PgCustomerStore::new(pool);

        let record = store.find_active_customer(42).await.unwrap().unwrap();

        assert_eq!(record.customer_id, 42);
        assert_eq!(record.uuid, uuid);
        assert_eq!(record.status, CustomerStatus::Active);
        assert_eq!(record.group_id, Some(1));
        assert_eq!(record.email, "customer42@example.com");
        assert_eq!(record.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.password.expose_secret(), "hash");
        assert!(record.created_at <= Utc::now());
        assert!(store.find_active_customer(43).await.unwrap().is_none());
    }
}
