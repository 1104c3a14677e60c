//! The page for editing an existing category.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID, endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    core::{CategoryId, get_category},
    form::{CategoryFormValues, category_form},
};

/// The state needed for the edit category page.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    /// The database connection for reading the category.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the form for editing the category with `category_id`.
///
/// Default categories get an explanation page instead of the form; the update
/// and delete endpoints reject them as well.
pub async fn get_edit_category_page(
    State(state): State<EditCategoryPageState>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let category = get_category(category_id, user_id, &connection)?;
    drop(connection);

    if category.is_default {
        let content = html! {
            (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

            div class=(PAGE_CONTAINER_STYLE) {
                div class="w-full max-w-md text-center py-8" {
                    h1 class="text-xl font-bold mb-2" { "Default Category" }
                    p class="text-gray-500 mb-4" {
                        "This is a default category and cannot be edited. You can create your \
                        own custom categories instead."
                    }
                    a href=(endpoints::CATEGORIES_VIEW) class=(LINK_STYLE) {
                        "Back to categories"
                    }
                }
            }
        };

        return Ok(base("Default Category", &[], &content).into_response());
    }

    let values = CategoryFormValues {
        name: category.name.clone(),
        kind: category.kind,
        icon: category.icon.clone(),
        color: category.color.clone(),
    };
    let update_url = endpoints::format_endpoint(endpoints::CATEGORY, category_id);

    let content = html! {
        (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Edit Category" }
                (category_form(("hx-put", &update_url), &values, "Save Changes"))
            }
        }
    };

    Ok(base("Edit Category", &[], &content).into_response())
}
