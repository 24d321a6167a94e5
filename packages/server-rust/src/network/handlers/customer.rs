//! Current-customer endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;
use storefront_core::RequestContext;

/// Returns the customer signed in through the session cookie.
///
/// 200 with `{ customer, sessionID }` when a customer was resolved,
/// otherwise 401 with `{ error, sessionID }`. The 401 body is the same for
/// every reason a session did not resolve.
pub async fn current_customer_handler(Extension(ctx): Extension<RequestContext>) -> Response {
    if let Some(customer) = ctx.current_customer() {
        return Json(json!({
            "customer": customer,
            "sessionID": ctx.session_id,
        }))
        .into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "not authenticated",
            "sessionID": ctx.session_id,
        })),
    )
        .into_response()
}
