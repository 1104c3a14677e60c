//! The page that lists the user's categories grouped by kind.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID, endpoints,
    html::{BUTTON_DELETE_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::TransactionKind,
};

use super::core::{Category, list_categories};

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesViewState {
    /// The database connection for reading categories.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the user's categories grouped into expense and income sections.
pub async fn get_categories_page(
    State(state): State<CategoriesViewState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let categories = list_categories(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    drop(connection);

    let content = html! {
        (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                div class="flex items-center justify-between mb-6" {
                    h1 class="text-xl font-bold" { "Categories" }
                    a
                        href=(endpoints::NEW_CATEGORY_VIEW)
                        class="px-3 py-2 rounded-lg bg-blue-500 hover:bg-blue-600 text-white text-sm"
                    { "Add Category" }
                }

                (category_section("Expense categories", TransactionKind::Expense, &categories))
                (category_section("Income categories", TransactionKind::Income, &categories))
            }
        }
    };

    Ok(base("Categories", &[], &content).into_response())
}

fn category_section(heading: &str, kind: TransactionKind, categories: &[Category]) -> Markup {
    let in_section: Vec<&Category> = categories
        .iter()
        .filter(|category| category.kind == kind)
        .collect();

    html! {
        section class="mb-6" {
            h2 class="text-lg font-bold mb-3" { (heading) }

            @if in_section.is_empty() {
                p class="text-sm text-gray-500" { "No categories yet." }
            } @else {
                ul class="space-y-2" {
                    @for category in in_section {
                        (category_row(category))
                    }
                }
            }
        }
    }
}

fn category_row(category: &Category) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
    let delete_url = endpoints::format_endpoint(endpoints::CATEGORY, category.id);

    html! {
        li id={ "category-" (category.id) } class=(CARD_STYLE) {
            div class="flex items-center gap-3" {
                span
                    class={ "w-10 h-10 rounded-lg flex items-center justify-center text-white "
                    (category.color) }
                { (category.icon) }

                div class="flex-1" {
                    div class="font-medium" { (category.name) }
                    @if category.is_default {
                        div class="text-xs text-gray-500" { "Default" }
                    }
                }

                // Default categories are immutable; the server enforces this
                // too, the missing controls are a courtesy.
                @if !category.is_default {
                    div class="flex items-center gap-1" {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                        button
                            class=(BUTTON_DELETE_STYLE)
                            hx-delete=(delete_url)
                            hx-target={ "#category-" (category.id) }
                            hx-swap="outerHTML"
                            hx-confirm={
                                "Delete \"" (category.name) "\"? Transactions in this category \
                                become uncategorized."
                            }
                            hx-ext="response-targets"
                            "hx-target-4*"="#alert-region"
                        { "Delete" }
                    }
                }
            }
        }
    }
}
