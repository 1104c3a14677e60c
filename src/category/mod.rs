//! Category management: user-defined and seeded default classifications for
//! transactions, each with a display icon and color.

mod categories_page;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_category_page;
mod edit_endpoint;
mod form;
mod new_category_page;
mod palette;

pub use categories_page::get_categories_page;
pub use core::{
    Category, CategoryId, NewCategory, create_category, create_category_table, delete_category,
    get_category, list_categories, seed_default_categories, update_category,
};
pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
pub use edit_category_page::get_edit_category_page;
pub use edit_endpoint::update_category_endpoint;
pub use new_category_page::get_new_category_page;
pub use palette::{
    CATEGORY_COLORS, CATEGORY_ICONS, UNCATEGORIZED_COLOR, UNCATEGORIZED_ICON, UNCATEGORIZED_LABEL,
};
