//! Page context setters for admin pages.

pub mod attribute_grid;

pub use attribute_grid::set_attribute_grid_context;
