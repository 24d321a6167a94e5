//! Tower middleware that attaches the session customer to each request.
//!
//! The layer makes sure every request carries a [`RequestContext`] in its
//! extensions, runs the [`SessionResolver`] against it, and then calls the
//! inner service exactly once, whatever the outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use storefront_core::RequestContext;
use tower::{Layer, Service};
use tracing::debug;

use super::resolver::{ResolveOutcome, SessionResolver};

// ---------------------------------------------------------------------------
// CustomerSessionLayer
// ---------------------------------------------------------------------------

/// Tower layer that resolves the storefront session customer.
#[derive(Clone)]
pub struct CustomerSessionLayer {
    resolver: Arc<SessionResolver>,
}

impl CustomerSessionLayer {
    #[must_use]
    pub fn new(resolver: Arc<SessionResolver>) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for CustomerSessionLayer {
    type Service = CustomerSessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CustomerSessionService {
            inner,
            resolver: Arc::clone(&self.resolver),
        }
    }
}

// ---------------------------------------------------------------------------
// CustomerSessionService
// ---------------------------------------------------------------------------

/// Service wrapper produced by [`CustomerSessionLayer`].
#[derive(Clone)]
pub struct CustomerSessionService<S> {
    inner: S,
    resolver: Arc<SessionResolver>,
}

impl<S, B> Service<Request<B>> for CustomerSessionService<S>
where
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        // The clone is not ready yet; keep the ready service for this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let resolver = Arc::clone(&self.resolver);

        Box::pin(async move {
            let mut ctx = req
                .extensions_mut()
                .remove::<RequestContext>()
                .unwrap_or_default();

            let outcome = resolver.resolve(&mut ctx, req.headers()).await;
            record_outcome(&outcome, &ctx);

            req.extensions_mut().insert(ctx);
            inner.call(req).await
        })
    }
}

/// Reports the outcome label only; never the session id or customer.
fn record_outcome(outcome: &ResolveOutcome, ctx: &RequestContext) {
    let label = outcome.label();
    metrics::counter!("storefront_session_resolutions_total", "outcome" => label).increment(1);
    debug!(
        outcome = label,
        authenticated = ctx.is_authenticated(),
        "session customer resolution"
    );
}
