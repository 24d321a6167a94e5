//! Session-based customer authentication for API routes.
//!
//! - [`config`]: Session cookie name and signing key
//! - [`resolver`]: Cookie → session → active customer lookup
//! - [`layer`]: Tower middleware running the resolver on every request

pub mod config;
pub mod layer;
pub mod resolver;

pub use config::{SessionConfig, SessionConfigError, DEFAULT_SESSION_COOKIE_NAME};
pub use layer::{CustomerSessionLayer, CustomerSessionService};
pub use resolver::{ResolveError, ResolveOutcome, SessionResolver};
