//! Admin page context endpoints.

use axum::extract::Query;
use axum::{Extension, Json};
use serde_json::json;
use storefront_core::RequestContext;

use crate::pages::set_attribute_grid_context;

/// Returns the attribute grid page context for the request URL.
pub async fn attribute_grid_handler(
    Extension(mut ctx): Extension<RequestContext>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<serde_json::Value> {
    set_attribute_grid_context(&mut ctx, query);

    Json(json!({
        "pageInfo": ctx.page_info,
        "filtersFromUrl": ctx.filters_from_url,
    }))
}
