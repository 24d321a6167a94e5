//! Storefront Server: API server that resolves the signed-in customer from
//! the storefront session cookie.

pub mod auth;
pub mod network;
pub mod pages;
pub mod storage;
pub mod traits;

pub use auth::{CustomerSessionLayer, ResolveOutcome, SessionConfig, SessionResolver};
pub use network::{NetworkConfig, NetworkModule};
pub use traits::{CustomerStore, SessionStore};

#[cfg(test)]
pub(crate) mod test_support;
