//! The page for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID,
    category::list_categories,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::current_local_date,
};

use super::{
    core::TransactionKind,
    form::{TransactionFormValues, transaction_form},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The database connection for reading categories.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name.
    local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the form for creating a new transaction.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let categories = list_categories(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    drop(connection);

    let values = TransactionFormValues {
        title: String::new(),
        amount: String::new(),
        kind: TransactionKind::Expense,
        date_time: format!("{today}T00:00"),
        category_id: None,
    };

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Add Transaction" }
                (transaction_form(
                    ("hx-post", endpoints::TRANSACTIONS_API),
                    &values,
                    &categories,
                    "Add Transaction",
                ))
            }
        }
    };

    Ok(base("Add Transaction", &[], &content).into_response())
}
