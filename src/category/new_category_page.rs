//! The page for creating a new category.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::TransactionKind,
};

use super::{
    form::{CategoryFormValues, category_form},
    palette::{CATEGORY_COLORS, CATEGORY_ICONS},
};

/// Display the form for creating a new category.
pub async fn get_new_category_page() -> Response {
    let values = CategoryFormValues {
        name: String::new(),
        kind: TransactionKind::Expense,
        icon: CATEGORY_ICONS[0].to_owned(),
        color: CATEGORY_COLORS[0].to_owned(),
    };

    let content = html! {
        (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Add Category" }
                (category_form(("hx-post", endpoints::CATEGORIES_API), &values, "Add Category"))
            }
        }
    };

    base("Add Category", &[], &content).into_response()
}
