//! Session and customer store implementations.
//!
//! - [`memory`]: `DashMap`-backed stores for tests and database-less runs
//! - [`postgres`]: `PostgreSQL` stores (requires the `postgres` feature)

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{MemoryCustomerStore, MemorySessionStore};
#[cfg(feature = "postgres")]
pub use postgres::{PgCustomerStore, PgSessionStore};
