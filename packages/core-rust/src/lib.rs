//! Storefront Core: customer, session, and request context types shared by
//! the storefront server.

pub mod context;
pub mod grid;
pub mod session;
pub mod types;

pub use context::RequestContext;
pub use grid::{build_filters_from_query, FilterOperation, GridFilter, PageInfo};
pub use session::SessionData;
pub use types::{Customer, CustomerId, CustomerRecord, CustomerStatus};
