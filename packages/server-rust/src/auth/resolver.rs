//! Session-backed customer resolution.
//!
//! [`SessionResolver`] turns the storefront session cookie of a request into
//! the signed-in customer. Every failure along the way (missing cookie,
//! bad signature, unknown or expired session, store errors, inactive
//! customer) ends in the same place: no customer on the context. Callers
//! cannot tell these cases apart, and the request continues anonymously.

use std::sync::Arc;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::SignedCookieJar;
use storefront_core::{Customer, CustomerId, RequestContext, SessionData};

use super::config::SessionConfig;
use crate::traits::{CustomerStore, SessionStore};

/// Why a request ended up without a customer.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no session cookie")]
    NoSessionCookie,
    #[error("session not found")]
    SessionNotFound,
    #[error("session store lookup failed")]
    SessionStore(#[source] anyhow::Error),
    #[error("malformed session record")]
    MalformedSession(#[from] serde_json::Error),
    #[error("session is not bound to a customer")]
    NoCustomerInSession,
    #[error("no active customer {customer_id}")]
    CustomerNotFound { customer_id: CustomerId },
    #[error("customer store lookup failed")]
    CustomerStore(#[source] anyhow::Error),
}

impl ResolveError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSessionCookie => "no_cookie",
            Self::SessionNotFound => "session_not_found",
            Self::SessionStore(_) => "session_store_error",
            Self::MalformedSession(_) => "malformed_session",
            Self::NoCustomerInSession => "anonymous_session",
            Self::CustomerNotFound { .. } => "customer_not_found",
            Self::CustomerStore(_) => "customer_store_error",
        }
    }
}

/// Result of one [`SessionResolver::resolve`] call.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// An earlier stage already put a customer on the context.
    AlreadyPresent,
    /// A customer was loaded and attached.
    Resolved,
    /// No customer; the request stays anonymous.
    Anonymous(ResolveError),
}

impl ResolveOutcome {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AlreadyPresent => "already_present",
            Self::Resolved => "resolved",
            Self::Anonymous(reason) => reason.label(),
        }
    }
}

/// Resolves the signed-in customer from the storefront session cookie.
///
/// Holds only read-only configuration and shared store handles, so one
/// instance serves all requests concurrently. Performs at most one session
/// read and one customer read per call and never writes to either store.
pub struct SessionResolver {
    config: SessionConfig,
    sessions: Arc<dyn SessionStore>,
    customers: Arc<dyn CustomerStore>,
}

impl SessionResolver {
    #[must_use]
    pub fn new(
        config: SessionConfig,
        sessions: Arc<dyn SessionStore>,
        customers: Arc<dyn CustomerStore>,
    ) -> Self {
        Self {
            config,
            sessions,
            customers,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Reads the session identifier from the signed session cookie.
    ///
    /// Returns `None` when the cookie is missing, empty, or its signature
    /// does not verify.
    #[must_use]
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let jar = SignedCookieJar::from_headers(headers, self.config.key.clone());
        jar.get(&self.config.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Loads the active customer bound to a session.
    ///
    /// # Errors
    ///
    /// Returns the reason no customer could be loaded. Callers are expected
    /// to treat every variant as "anonymous".
    pub async fn lookup_customer(&self, session_id: &str) -> Result<Customer, ResolveError> {
        let raw = self
            .sessions
            .load_session(session_id)
            .await
            .map_err(ResolveError::SessionStore)?
            .ok_or(ResolveError::SessionNotFound)?;

        let session = SessionData::from_value(raw)?;
        let customer_id = session
            .customer_id
            .ok_or(ResolveError::NoCustomerInSession)?;

        let record = self
            .customers
            .find_active_customer(customer_id)
            .await
            .map_err(ResolveError::CustomerStore)?
            .ok_or(ResolveError::CustomerNotFound { customer_id })?;

        // The store contract is "active only"; a store that ignores it must
        // still not produce a principal.
        if !record.status.is_active() {
            return Err(ResolveError::CustomerNotFound { customer_id });
        }

        Ok(record.into_customer())
    }

    /// Fills `ctx` with the customer and session id found in `headers`.
    ///
    /// Leaves `ctx` untouched when it already carries a customer. Otherwise
    /// the session id is recorded whenever the cookie is present, and the
    /// customer only when the whole lookup succeeds.
    pub async fn resolve(&self, ctx: &mut RequestContext, headers: &HeaderMap) -> ResolveOutcome {
        if ctx.customer.is_some() {
            return ResolveOutcome::AlreadyPresent;
        }

        let Some(session_id) = self.session_id_from_headers(headers) else {
            return ResolveOutcome::Anonymous(ResolveError::NoSessionCookie);
        };

        let lookup = self.lookup_customer(&session_id).await;
        ctx.session_id = Some(session_id);

        match lookup {
            Ok(customer) => {
                ctx.customer = Some(customer);
                ResolveOutcome::Resolved
            }
            Err(reason) => ResolveOutcome::Anonymous(reason),
        }
    }
}
