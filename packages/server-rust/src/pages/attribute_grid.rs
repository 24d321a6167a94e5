//! Admin attribute grid.

use storefront_core::{build_filters_from_query, PageInfo, RequestContext};

pub const PAGE_TITLE: &str = "Attributes";
pub const PAGE_DESCRIPTION: &str = "Attributes";

/// Sets the page metadata and URL filters of the attribute grid.
pub fn set_attribute_grid_context<I, K, V>(ctx: &mut RequestContext, query: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    ctx.page_info = Some(PageInfo::new(PAGE_TITLE, PAGE_DESCRIPTION));
    ctx.filters_from_url = build_filters_from_query(query);
}
