use crate::grid::{GridFilter, PageInfo};
use crate::types::Customer;

/// Per-request context filled by middleware and read by handlers.
///
/// Lives in the request's extensions for the duration of one request. The
/// default value is the empty context: no customer, no session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Signed-in customer, if one was resolved for this request.
    pub customer: Option<Customer>,
    /// Raw storefront session identifier taken from the session cookie.
    /// Set even when no customer could be resolved, so anonymous sessions
    /// (carts, recently viewed) can still be correlated.
    pub session_id: Option<String>,
    /// Admin page metadata.
    pub page_info: Option<PageInfo>,
    /// Grid filters requested through the page URL.
    pub filters_from_url: Vec<GridFilter>,
}

impl RequestContext {
    /// Returns the signed-in customer, if any.
    #[must_use]
    pub fn current_customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }
}
